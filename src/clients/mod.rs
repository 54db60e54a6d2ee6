pub mod backend_client;

pub use backend_client::{AlocRequest, HttpBackend, JobMessage, MySchoolRequest, QuestionBackend};
