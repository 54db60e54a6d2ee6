//! 渲染器接口
//!
//! 控制器把所有可见输出都交给它；具体界面（终端、测试记录器）只实现此 trait

use crate::models::{FetchResult, FilterCatalog, SubjectEntry};

/// 题目列表为空时的占位文本
pub const EMPTY_PLACEHOLDER: &str =
    "No questions found matching your filters. Try clicking \"Ingest\" for more data.";
/// 查询失败时的占位文本
pub const ERROR_PLACEHOLDER: &str = "Error connecting to backend API or loading filters.";

/// 科目下拉框的显示状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectListView {
    Loading,
    Entries {
        entries: Vec<SubjectEntry>,
        selected: String,
    },
    NoSubjects,
    LoadError,
}

impl SubjectListView {
    /// 非列表状态下的提示文字
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            SubjectListView::Loading => Some("Loading subjects..."),
            SubjectListView::NoSubjects => Some("No subjects found"),
            SubjectListView::LoadError => Some("Error loading subjects"),
            SubjectListView::Entries { .. } => None,
        }
    }
}

/// 执行期间需要禁用的触发动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Ingest,
    Reset,
}

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// 用户动作的结果通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

pub trait Renderer: Send + Sync {
    fn show_subjects(&self, view: &SubjectListView);

    /// `year` / `topic` 为 None 表示"全部"
    fn show_filters(&self, catalog: &FilterCatalog, year: Option<i32>, topic: Option<&str>);

    fn show_results(&self, result: &FetchResult);

    fn show_title(&self, title: &str);

    fn notify(&self, notice: &Notice);

    fn set_busy(&self, action: Action, busy: bool);
}

/// 页面标题，如 "JAMB Biology Past Questions"
pub fn page_title(exam_type: &str, subject: &str) -> String {
    let mut chars = subject.chars();
    let subject = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("{} {} Past Questions", exam_type.to_uppercase(), subject)
}
