//! 题目查询 - 业务能力层
//!
//! 只负责"按当前选择取题并做本地搜索过滤"，
//! 过期响应的丢弃由编排层的请求序号完成

use crate::clients::QuestionBackend;
use crate::models::{FetchResult, SelectionState};
use crate::utils::logging::truncate_text;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct QuestionFetcher {
    backend: Arc<dyn QuestionBackend>,
}

impl QuestionFetcher {
    pub fn new(backend: Arc<dyn QuestionBackend>) -> Self {
        Self { backend }
    }

    /// 查询题目
    ///
    /// # 参数
    /// - `selection`: 发起请求时的选择快照
    /// - `subject_valid`: 科目是否在已加载的目录内；否则直接视为无结果，不发请求
    ///
    /// # 返回
    /// 过滤后的 `FetchResult`，永不 panic
    pub async fn fetch(&self, selection: &SelectionState, subject_valid: bool) -> FetchResult {
        if !subject_valid {
            debug!("科目 {} 不在目录中，跳过查询", selection.subject());
            return FetchResult::Empty;
        }

        let query = selection.to_query();
        debug!("查询题目: {:?}", query);

        match self.backend.questions(&query).await {
            Ok(records) => {
                let total = records.len();
                let result = FetchResult::from_records(records, selection.search_term());
                debug!(
                    "后端返回 {} 道题，搜索 \"{}\" 后剩 {} 道",
                    total,
                    truncate_text(selection.search_term(), 30),
                    result.records().len()
                );
                result
            }
            Err(e) => {
                warn!("⚠️ 题目查询失败: {}", e);
                FetchResult::Error(e.reason())
            }
        }
    }
}
