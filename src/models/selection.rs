//! 当前选择状态
//!
//! 纯数据，只通过具名 setter 修改；每个 setter 只改一个字段，
//! 返回值表示该字段是否真的变化（调用方据此决定是否重新查询）

use serde::Serialize;
use std::fmt;

/// 考试类型标签（jamb / waec / ...），不设上限，统一小写
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExamType(String);

impl ExamType {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    exam_type: ExamType,
    subject: String,
    year_filter: Option<i32>,
    topic_filter: Option<String>,
    search_term: String,
}

impl SelectionState {
    /// 目录加载前使用占位科目
    pub fn new(exam_type: ExamType, placeholder_subject: impl Into<String>) -> Self {
        Self {
            exam_type,
            subject: placeholder_subject.into(),
            year_filter: None,
            topic_filter: None,
            search_term: String::new(),
        }
    }

    pub fn exam_type(&self) -> &ExamType {
        &self.exam_type
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn year_filter(&self) -> Option<i32> {
        self.year_filter
    }

    pub fn topic_filter(&self) -> Option<&str> {
        self.topic_filter.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_exam_type(&mut self, exam_type: ExamType) -> bool {
        replace_if_changed(&mut self.exam_type, exam_type)
    }

    pub fn set_subject(&mut self, key: impl Into<String>) -> bool {
        replace_if_changed(&mut self.subject, key.into())
    }

    pub fn set_year_filter(&mut self, year: Option<i32>) -> bool {
        replace_if_changed(&mut self.year_filter, year)
    }

    /// 空字符串视为"不筛选"
    pub fn set_topic_filter(&mut self, topic: Option<String>) -> bool {
        let topic = topic.filter(|t| !t.is_empty());
        replace_if_changed(&mut self.topic_filter, topic)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        replace_if_changed(&mut self.search_term, term.into())
    }

    /// 构建发往 `/questions` 的查询（搜索词不发送）
    pub fn to_query(&self) -> QuestionQuery {
        QuestionQuery {
            subject: self.subject.clone(),
            exam_type: self.exam_type.as_str().to_string(),
            year: self.year_filter,
            topic: self.topic_filter.clone(),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// `/questions` 查询参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionQuery {
    pub subject: String,
    pub exam_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}
