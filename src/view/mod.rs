pub mod card;
pub mod console;
pub mod renderer;

pub use card::QuestionCard;
pub use console::ConsoleRenderer;
pub use renderer::{
    page_title, Action, Notice, NoticeLevel, Renderer, SubjectListView, EMPTY_PLACEHOLDER,
    ERROR_PLACEHOLDER,
};
