use serde::{Deserialize, Serialize};

/// 后端返回的一道题目
///
/// 客户端只做过滤与展示，从不修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub body: String,
    /// 为空或缺失表示没有选项（如主观题）
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// 答案标签，按位置引用选项（"A" 表示第一个）
    #[serde(rename = "answer", default)]
    pub answer_label: String,
    #[serde(default)]
    pub explanation: Option<String>,
    pub exam_type: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default = "default_question_type")]
    pub question_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

fn default_question_type() -> String {
    "objective".to_string()
}

impl QuestionRecord {
    /// 选项列表（缺失时为空）
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// 单字母答案标签对应的选项位置
    pub fn answer_index(&self) -> Option<usize> {
        let label = self.answer_label.trim();
        let mut chars = label.chars();
        let letter = chars.next()?;
        if chars.next().is_some() || !letter.is_ascii_alphabetic() {
            return None;
        }

        let index = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
        (index < self.options().len()).then_some(index)
    }

    /// 答案引用的选项文本
    pub fn answer_option(&self) -> Option<&str> {
        self.answer_index()
            .and_then(|i| self.options().get(i))
            .map(String::as_str)
    }

    /// 题干是否包含搜索词（不区分大小写）
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        term.is_empty() || self.body.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(body: &str, options: Option<Vec<&str>>, answer: &str) -> QuestionRecord {
        QuestionRecord {
            id: None,
            body: body.to_string(),
            options: options.map(|o| o.into_iter().map(String::from).collect()),
            answer_label: answer.to_string(),
            explanation: None,
            exam_type: "jamb".to_string(),
            year: Some(2015),
            topic: None,
            subject: None,
            question_type: default_question_type(),
            source_url: None,
        }
    }

    #[test]
    fn decodes_backend_shape() {
        let json = r#"{
            "id": 3,
            "body": "Which organelle controls the cell?",
            "options": ["Nucleus", "Ribosome"],
            "answer": "A",
            "explanation": null,
            "subject": "biology",
            "year": 2015,
            "exam_type": "jamb",
            "question_type": "objective",
            "topic": "Cell Biology",
            "source_url": null
        }"#;

        let q: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(q.answer_option(), Some("Nucleus"));
        assert_eq!(q.topic.as_deref(), Some("Cell Biology"));
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let q: QuestionRecord =
            serde_json::from_str(r#"{"body": "Define osmosis.", "exam_type": "waec"}"#).unwrap();
        assert!(q.options().is_empty());
        assert_eq!(q.question_type, "objective");
        assert_eq!(q.answer_index(), None);
    }

    #[test]
    fn answer_label_outside_options_is_unresolved() {
        let q = record("x", Some(vec!["a", "b"]), "D");
        assert_eq!(q.answer_index(), None);

        let q = record("x", Some(vec!["Lagos", "Abuja"]), "Abuja");
        assert_eq!(q.answer_index(), None);

        let q = record("x", Some(vec!["a", "b"]), "b");
        assert_eq!(q.answer_index(), Some(1));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let q = record("The Cell Membrane is selectively permeable", None, "A");
        assert!(q.matches_search("cell membrane"));
        assert!(q.matches_search("CELL"));
        assert!(q.matches_search(""));
        assert!(!q.matches_search("mitochondria"));
    }
}
