pub mod filter_loader;
pub mod ingestion;
pub mod question_fetcher;
pub mod reset;
pub mod subject_loader;

pub use filter_loader::{reconcile_selection, FilterLoader};
pub use ingestion::{IngestSource, IngestionService};
pub use question_fetcher::QuestionFetcher;
pub use reset::{Confirmation, ResetService, RESET_PROMPT};
pub use subject_loader::SubjectLoader;
