pub mod fetch_result;
pub mod filters;
pub mod question;
pub mod selection;
pub mod subject;

pub use fetch_result::FetchResult;
pub use filters::{FilterCatalog, FiltersPayload};
pub use question::QuestionRecord;
pub use selection::{ExamType, QuestionQuery, SelectionState};
pub use subject::{SubjectCatalog, SubjectEntry, SubjectPayload};
