use crate::models::QuestionRecord;

/// 单张题目卡片的展示数据
///
/// 解析折叠状态只影响展示，不触发查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard {
    pub meta: String,
    pub body: String,
    pub options: Vec<String>,
    pub answer_line: String,
    pub explanation: String,
    pub revealed: bool,
}

impl QuestionCard {
    pub fn from_record(record: &QuestionRecord) -> Self {
        let meta = format!(
            "{} {} | {}",
            record.exam_type.to_uppercase(),
            record.year.map(|y| y.to_string()).unwrap_or_default(),
            record.topic.as_deref().filter(|t| !t.is_empty()).unwrap_or("General")
        );

        let options = record
            .options()
            .iter()
            .enumerate()
            .map(|(i, opt)| format!("{}: {}", option_letter(i), opt))
            .collect();

        Self {
            meta,
            body: record.body.clone(),
            options,
            answer_line: format!("Correct Answer: Option {}", record.answer_label),
            explanation: record
                .explanation
                .clone()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "No further explanation provided.".to_string()),
            revealed: false,
        }
    }

    pub fn toggle_explanation(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.revealed {
            "Hide Explanation"
        } else {
            "Show Explanation"
        }
    }
}

/// 选项序号：0 -> A
fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
