//! 筛选目录加载 - 业务能力层

use crate::clients::QuestionBackend;
use crate::error::ApiError;
use crate::models::{FilterCatalog, SelectionState};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct FilterLoader {
    backend: Arc<dyn QuestionBackend>,
}

impl FilterLoader {
    pub fn new(backend: Arc<dyn QuestionBackend>) -> Self {
        Self { backend }
    }

    /// 请求 `/filters`；失败只记录日志，由调用方保留旧目录
    pub async fn load(&self) -> Result<FilterCatalog, ApiError> {
        match self.backend.filters().await {
            Ok(catalog) => {
                debug!(
                    "筛选目录: {} 个年份, {} 个知识点",
                    catalog.years.len(),
                    catalog.topics.len()
                );
                Ok(catalog)
            }
            Err(e) => {
                warn!("⚠️ 筛选目录加载失败，沿用旧目录: {}", e);
                Err(e)
            }
        }
    }
}

/// 新目录中已不存在的年份 / 知识点回退为"不筛选"
///
/// 两个字段分别调用各自的 setter；返回是否有字段被清除
pub fn reconcile_selection(selection: &mut SelectionState, catalog: &FilterCatalog) -> bool {
    let mut cleared = false;

    if let Some(year) = selection.year_filter() {
        if !catalog.has_year(year) {
            cleared |= selection.set_year_filter(None);
        }
    }

    let stale_topic = selection
        .topic_filter()
        .is_some_and(|topic| !catalog.has_topic(topic));
    if stale_topic {
        cleared |= selection.set_topic_filter(None);
    }

    cleared
}
