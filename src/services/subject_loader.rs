//! 科目目录加载 - 业务能力层
//!
//! 只负责"取科目列表"，默认科目的选择与后续查询由编排层决定

use crate::clients::QuestionBackend;
use crate::error::ApiError;
use crate::models::SubjectCatalog;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SubjectLoader {
    backend: Arc<dyn QuestionBackend>,
}

impl SubjectLoader {
    pub fn new(backend: Arc<dyn QuestionBackend>) -> Self {
        Self { backend }
    }

    /// 请求 `/myschool-subjects`，空列表也是合法结果
    pub async fn load(&self) -> Result<SubjectCatalog, ApiError> {
        match self.backend.subjects().await {
            Ok(entries) => {
                let catalog = SubjectCatalog::from_entries(entries);
                info!("✓ 科目目录加载完成，共 {} 个科目", catalog.entries().len());
                Ok(catalog)
            }
            Err(e) => {
                warn!("⚠️ 科目目录加载失败: {}", e);
                Err(e)
            }
        }
    }
}
