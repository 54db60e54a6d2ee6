//! 题目浏览控制器 - 编排层
//!
//! ## 职责
//!
//! 持有唯一的选择状态与两个目录，决定何时重新查询，并保证：
//!
//! 1. **固定顺序**：科目目录加载结束（无论成败）后，恰好执行一次筛选目录加载和题目查询
//! 2. **过期响应丢弃**：多次查询并发时，只有最后发出的请求能写入可见状态
//! 3. **触发防重入**：导入 / 清空执行期间，再次触发直接拒绝
//!
//! 状态锁只在同步片段内持有，从不跨越 `.await`。

use super::sequence::RequestSequence;
use super::trigger_gate::TriggerGate;
use crate::clients::QuestionBackend;
use crate::config::Config;
use crate::error::{IngestError, ResetError};
use crate::models::{ExamType, FetchResult, FilterCatalog, SelectionState, SubjectCatalog, SubjectEntry};
use crate::services::{
    reconcile_selection, Confirmation, FilterLoader, IngestSource, IngestionService,
    QuestionFetcher, ResetService, SubjectLoader,
};
use crate::view::{page_title, Action, Notice, Renderer, SubjectListView};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 一次题目查询的去向
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 结果已写入可见状态
    Applied(FetchResult),
    /// 已有更新的请求发出，本次结果被丢弃
    Stale { token: u64 },
}

impl FetchOutcome {
    pub fn applied(&self) -> Option<&FetchResult> {
        match self {
            FetchOutcome::Applied(result) => Some(result),
            FetchOutcome::Stale { .. } => None,
        }
    }
}

/// 启动流程的结果
#[derive(Debug, Clone, PartialEq)]
pub struct StartupReport {
    pub subjects_loaded: bool,
    pub subject_count: usize,
    pub filters_loaded: bool,
    pub questions: FetchOutcome,
}

/// 清空操作的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// 用户未确认，没有发出请求
    Cancelled,
    Cleared(String),
}

#[derive(Debug)]
struct BrowserState {
    selection: SelectionState,
    subjects: SubjectCatalog,
    filters: FilterCatalog,
    last_result: Option<FetchResult>,
}

pub struct QuestionBrowser {
    default_subject: String,
    subject_loader: SubjectLoader,
    filter_loader: FilterLoader,
    fetcher: QuestionFetcher,
    ingestion: IngestionService,
    reset: ResetService,
    renderer: Arc<dyn Renderer>,
    state: Mutex<BrowserState>,
    sequence: RequestSequence,
    ingest_gate: TriggerGate,
    reset_gate: TriggerGate,
}

impl QuestionBrowser {
    pub fn new(config: &Config, backend: Arc<dyn QuestionBackend>, renderer: Arc<dyn Renderer>) -> Self {
        let selection = SelectionState::new(
            ExamType::new(&config.default_exam_type),
            config.default_subject.clone(),
        );

        Self {
            default_subject: config.default_subject.to_lowercase(),
            subject_loader: SubjectLoader::new(backend.clone()),
            filter_loader: FilterLoader::new(backend.clone()),
            fetcher: QuestionFetcher::new(backend.clone()),
            ingestion: IngestionService::new(backend.clone(), config),
            reset: ResetService::new(backend),
            renderer,
            state: Mutex::new(BrowserState {
                selection,
                subjects: SubjectCatalog::default(),
                filters: FilterCatalog::default(),
                last_result: None,
            }),
            sequence: RequestSequence::new(),
            ingest_gate: TriggerGate::new(Action::Ingest),
            reset_gate: TriggerGate::new(Action::Reset),
        }
    }

    // ========== 读取 ==========

    pub fn selection(&self) -> SelectionState {
        self.state.lock().selection.clone()
    }

    pub fn subjects(&self) -> SubjectCatalog {
        self.state.lock().subjects.clone()
    }

    pub fn filters(&self) -> FilterCatalog {
        self.state.lock().filters.clone()
    }

    /// 最近一次被应用到界面的查询结果
    pub fn last_result(&self) -> Option<FetchResult> {
        self.state.lock().last_result.clone()
    }

    /// 当前选中的科目条目（目录中不存在时为 None）
    pub fn selected_subject(&self) -> Option<SubjectEntry> {
        let state = self.state.lock();
        state.subjects.get(state.selection.subject()).cloned()
    }

    pub fn is_ingesting(&self) -> bool {
        self.ingest_gate.is_pending()
    }

    // ========== 目录加载 ==========

    /// 加载科目目录，随后依次执行一次筛选目录加载和题目查询
    ///
    /// 后续两步与科目加载成败无关，总会执行且只执行一次
    pub async fn load_subjects(&self) -> StartupReport {
        self.renderer.show_subjects(&SubjectListView::Loading);

        let subjects_loaded = match self.subject_loader.load().await {
            Ok(catalog) => {
                self.apply_subject_catalog(catalog);
                true
            }
            Err(_) => {
                self.renderer.show_subjects(&SubjectListView::LoadError);
                false
            }
        };
        let subject_count = self.state.lock().subjects.entries().len();

        let filters_loaded = self.load_filters().await;
        let questions = self.fetch_questions().await;

        StartupReport {
            subjects_loaded,
            subject_count,
            filters_loaded,
            questions,
        }
    }

    fn apply_subject_catalog(&self, catalog: SubjectCatalog) {
        let mut state = self.state.lock();

        let view = match catalog.default_key(&self.default_subject) {
            Some(key) => {
                let key = key.to_string();
                state.selection.set_subject(key.clone());
                SubjectListView::Entries {
                    entries: catalog.entries().to_vec(),
                    selected: key,
                }
            }
            None => {
                warn!("⚠️ 科目目录为空");
                SubjectListView::NoSubjects
            }
        };
        state.subjects = catalog;
        drop(state);

        self.renderer.show_subjects(&view);
    }

    /// 加载筛选目录；失败时保留旧目录，不影响题目显示
    ///
    /// # 返回
    /// 是否加载成功
    pub async fn load_filters(&self) -> bool {
        let Ok(catalog) = self.filter_loader.load().await else {
            return false;
        };

        let mut state = self.state.lock();
        if reconcile_selection(&mut state.selection, &catalog) {
            info!("原筛选项已不在新目录中，回退为全部");
        }
        state.filters = catalog;
        self.renderer.show_filters(
            &state.filters,
            state.selection.year_filter(),
            state.selection.topic_filter(),
        );
        true
    }

    // ========== 题目查询 ==========

    /// 按当前选择查询题目
    ///
    /// 发出请求时取得序号；响应到达时若已有更新的请求，结果直接丢弃
    pub async fn fetch_questions(&self) -> FetchOutcome {
        let (token, selection, subject_valid) = {
            let state = self.state.lock();
            let token = self.sequence.issue();
            let valid = state.subjects.accepts(state.selection.subject());
            (token, state.selection.clone(), valid)
        };
        debug!("查询 #{} 已发出", token);

        let result = self.fetcher.fetch(&selection, subject_valid).await;

        let mut state = self.state.lock();
        if !self.sequence.is_latest(token) {
            warn!(
                "丢弃过期响应 #{} (最新 #{})",
                token,
                self.sequence.latest()
            );
            return FetchOutcome::Stale { token };
        }

        self.renderer.show_results(&result);
        if let FetchResult::Ok(_) = result {
            self.renderer
                .show_title(&page_title(selection.exam_type().as_str(), selection.subject()));
        }
        state.last_result = Some(result.clone());

        FetchOutcome::Applied(result)
    }

    // ========== 选择变更 ==========
    // 每个 setter 只改一个字段；值未变化时不查询，返回 None

    pub async fn select_exam_type(&self, tag: &str) -> Option<FetchOutcome> {
        let title = {
            let mut state = self.state.lock();
            if !state.selection.set_exam_type(ExamType::new(tag)) {
                return None;
            }
            let subject = state
                .subjects
                .get(state.selection.subject())
                .map(|e| e.display_name.clone())
                .unwrap_or_else(|| state.selection.subject().to_string());
            page_title(state.selection.exam_type().as_str(), &subject)
        };

        // 标题先行更新，与查询是两个独立效果
        self.renderer.show_title(&title);
        Some(self.fetch_questions().await)
    }

    /// 目录非空时只接受目录内的 key
    pub async fn select_subject(&self, key: &str) -> Option<FetchOutcome> {
        let key = key.trim().to_lowercase();
        {
            let mut state = self.state.lock();
            if !state.subjects.is_empty() && !state.subjects.contains(&key) {
                warn!("⚠️ 科目 {} 不在目录中，忽略", key);
                return None;
            }
            if !state.selection.set_subject(key) {
                return None;
            }
        }
        Some(self.fetch_questions().await)
    }

    pub async fn select_year(&self, year: Option<i32>) -> Option<FetchOutcome> {
        if !self.state.lock().selection.set_year_filter(year) {
            return None;
        }
        Some(self.fetch_questions().await)
    }

    pub async fn select_topic(&self, topic: Option<String>) -> Option<FetchOutcome> {
        if !self.state.lock().selection.set_topic_filter(topic) {
            return None;
        }
        Some(self.fetch_questions().await)
    }

    /// 搜索词同样触发查询；输入去抖由调用方负责
    pub async fn set_search_term(&self, term: &str) -> Option<FetchOutcome> {
        if !self.state.lock().selection.set_search_term(term) {
            return None;
        }
        Some(self.fetch_questions().await)
    }

    // ========== 触发动作 ==========

    /// 触发导入任务
    ///
    /// 成功后重新加载筛选目录并查询一次；失败时不刷新
    pub async fn ingest(&self, source: IngestSource) -> Result<String, IngestError> {
        let Some(_guard) = self.ingest_gate.try_enter(self.renderer.as_ref()) else {
            warn!("⚠️ 已有导入任务在进行，忽略本次触发");
            return Err(IngestError::Busy);
        };

        let (subject, exam_type) = {
            let state = self.state.lock();
            (
                state.subjects.get(state.selection.subject()).cloned(),
                state.selection.exam_type().clone(),
            )
        };

        match self.ingestion.ingest(source, subject.as_ref(), &exam_type).await {
            Ok(message) => {
                self.renderer.notify(&Notice::info(&message));
                self.load_filters().await;
                self.fetch_questions().await;
                Ok(message)
            }
            Err(e) => {
                error!("导入失败: {}", e);
                self.renderer.notify(&Notice::error(format!("Attention: {}", e)));
                Err(e)
            }
        }
    }

    /// 清空题库，需要用户明确确认
    pub async fn reset_all(&self, confirmation: Confirmation) -> Result<ResetOutcome, ResetError> {
        if confirmation == Confirmation::Denied {
            info!("用户取消清空操作");
            return Ok(ResetOutcome::Cancelled);
        }

        let Some(_guard) = self.reset_gate.try_enter(self.renderer.as_ref()) else {
            warn!("⚠️ 清空操作进行中，忽略本次触发");
            return Err(ResetError::Busy);
        };

        match self.reset.clear().await {
            Ok(message) => {
                self.renderer.notify(&Notice::info(&message));
                self.fetch_questions().await;
                Ok(ResetOutcome::Cleared(message))
            }
            Err(e) => {
                self.renderer.notify(&Notice::error(e.to_string()));
                Err(e)
            }
        }
    }
}
