//! 清空题库 - 业务能力层

use crate::clients::QuestionBackend;
use crate::error::ResetError;
use std::sync::Arc;
use tracing::{error, info};

/// 清空前的确认提示
pub const RESET_PROMPT: &str =
    "Are you sure you want to delete ALL questions from the database? This cannot be undone.";

/// 用户对破坏性操作的确认结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Granted,
    Denied,
}

impl Confirmation {
    /// 把 y / yes 视为确认
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Confirmation::Granted,
            _ => Confirmation::Denied,
        }
    }
}

pub struct ResetService {
    backend: Arc<dyn QuestionBackend>,
}

impl ResetService {
    pub fn new(backend: Arc<dyn QuestionBackend>) -> Self {
        Self { backend }
    }

    /// 请求 `/clear-questions`
    pub async fn clear(&self) -> Result<String, ResetError> {
        match self.backend.clear_questions().await {
            Ok(job) => {
                let message = job
                    .text()
                    .unwrap_or("All questions have been deleted from the database")
                    .to_string();
                info!("🗑️ 题库已清空: {}", message);
                Ok(message)
            }
            Err(e) => {
                error!("清空题库失败: {}", e);
                Err(ResetError::Failed(e))
            }
        }
    }
}
