#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use past_questions_client::clients::backend_client::classify_status;
use past_questions_client::clients::{AlocRequest, JobMessage, MySchoolRequest, QuestionBackend};
use past_questions_client::models::{FetchResult, FilterCatalog, QuestionQuery, QuestionRecord, SubjectEntry};
use past_questions_client::view::{Action, Notice, Renderer, SubjectListView};
use past_questions_client::{ApiError, Config, QuestionBrowser};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// 假后端的预设应答
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16, Option<String>),
    Malformed,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self, endpoint: &str) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(code, message) => {
                let body = serde_json::json!({ "detail": message }).to_string();
                let status = StatusCode::from_u16(*code).unwrap();
                Err(classify_status(endpoint, status, &body))
            }
            Reply::Malformed => Err(ApiError::Decode {
                endpoint: endpoint.to_string(),
                source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            }),
        }
    }
}

pub struct FakeBackend {
    pub subjects: Mutex<Reply<Vec<SubjectEntry>>>,
    pub filters: Mutex<Reply<FilterCatalog>>,
    pub questions: Mutex<Reply<Vec<QuestionRecord>>>,
    /// 按年份覆盖题目应答
    pub questions_by_year: Mutex<HashMap<i32, Vec<QuestionRecord>>>,
    /// 按年份设置题目请求延迟
    pub question_delays: Mutex<HashMap<i32, Duration>>,
    pub scrape: Mutex<Reply<JobMessage>>,
    pub aloc: Mutex<Reply<JobMessage>>,
    pub clear: Mutex<Reply<JobMessage>>,
    pub job_delay: Mutex<Duration>,

    pub calls: Mutex<Vec<String>>,
    pub queries: Mutex<Vec<QuestionQuery>>,
    pub myschool_requests: Mutex<Vec<MySchoolRequest>>,
    pub aloc_requests: Mutex<Vec<AlocRequest>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            subjects: Mutex::new(Reply::Ok(vec![
                SubjectEntry::new("Biology", Some("https://myschool.ng/classroom/biology".into())),
                SubjectEntry::new("Chemistry", None),
            ])),
            filters: Mutex::new(Reply::Ok(FilterCatalog {
                years: vec![2016, 2015],
                topics: vec!["Cells".to_string(), "Ecology".to_string()],
            })),
            questions: Mutex::new(Reply::Ok(Vec::new())),
            questions_by_year: Mutex::new(HashMap::new()),
            question_delays: Mutex::new(HashMap::new()),
            scrape: Mutex::new(Reply::Ok(job("Scraped and added 12 questions for Biology"))),
            aloc: Mutex::new(Reply::Ok(job("Added 100 questions for Biology using ALOC source."))),
            clear: Mutex::new(Reply::Ok(job("All questions have been deleted from the database"))),
            job_delay: Mutex::new(Duration::ZERO),
            calls: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            myschool_requests: Mutex::new(Vec::new()),
            aloc_requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == endpoint).count()
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, endpoint: &str) {
        self.calls.lock().push(endpoint.to_string());
    }
}

#[async_trait]
impl QuestionBackend for FakeBackend {
    async fn filters(&self) -> Result<FilterCatalog, ApiError> {
        self.record("/filters");
        let reply = self.filters.lock().clone();
        reply.resolve("/filters")
    }

    async fn subjects(&self) -> Result<Vec<SubjectEntry>, ApiError> {
        self.record("/myschool-subjects");
        let reply = self.subjects.lock().clone();
        reply.resolve("/myschool-subjects")
    }

    async fn questions(&self, query: &QuestionQuery) -> Result<Vec<QuestionRecord>, ApiError> {
        self.record("/questions");
        self.queries.lock().push(query.clone());

        let delay = query
            .year
            .and_then(|y| self.question_delays.lock().get(&y).copied())
            .unwrap_or(Duration::ZERO);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let by_year = query
            .year
            .and_then(|y| self.questions_by_year.lock().get(&y).cloned());
        match by_year {
            Some(records) => Ok(records),
            None => {
                let reply = self.questions.lock().clone();
                reply.resolve("/questions")
            }
        }
    }

    async fn scrape_myschool(&self, request: &MySchoolRequest) -> Result<JobMessage, ApiError> {
        self.record("/scrape/myschool");
        self.myschool_requests.lock().push(request.clone());
        let delay = *self.job_delay.lock();
        tokio::time::sleep(delay).await;
        let reply = self.scrape.lock().clone();
        reply.resolve("/scrape/myschool")
    }

    async fn fetch_aloc(&self, request: &AlocRequest) -> Result<JobMessage, ApiError> {
        self.record("/fetch-aloc");
        self.aloc_requests.lock().push(request.clone());
        let delay = *self.job_delay.lock();
        tokio::time::sleep(delay).await;
        let reply = self.aloc.lock().clone();
        reply.resolve("/fetch-aloc")
    }

    async fn clear_questions(&self) -> Result<JobMessage, ApiError> {
        self.record("/clear-questions");
        let reply = self.clear.lock().clone();
        reply.resolve("/clear-questions")
    }
}

/// 渲染器收到的调用
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Subjects(SubjectListView),
    Filters {
        catalog: FilterCatalog,
        year: Option<i32>,
        topic: Option<String>,
    },
    Results(FetchResult),
    Title(String),
    Notice(Notice),
    Busy(Action, bool),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub events: Mutex<Vec<Event>>,
}

impl RecordingRenderer {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn results(&self) -> Vec<FetchResult> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Results(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn titles(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Title(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn last_subjects(&self) -> Option<SubjectListView> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Subjects(v) => Some(v),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn show_subjects(&self, view: &SubjectListView) {
        self.events.lock().push(Event::Subjects(view.clone()));
    }

    fn show_filters(&self, catalog: &FilterCatalog, year: Option<i32>, topic: Option<&str>) {
        self.events.lock().push(Event::Filters {
            catalog: catalog.clone(),
            year,
            topic: topic.map(str::to_string),
        });
    }

    fn show_results(&self, result: &FetchResult) {
        self.events.lock().push(Event::Results(result.clone()));
    }

    fn show_title(&self, title: &str) {
        self.events.lock().push(Event::Title(title.to_string()));
    }

    fn notify(&self, notice: &Notice) {
        self.events.lock().push(Event::Notice(notice.clone()));
    }

    fn set_busy(&self, action: Action, busy: bool) {
        self.events.lock().push(Event::Busy(action, busy));
    }
}

pub fn job(message: &str) -> JobMessage {
    JobMessage {
        message: Some(message.to_string()),
        detail: None,
    }
}

pub fn question(body: &str, year: Option<i32>) -> QuestionRecord {
    QuestionRecord {
        id: None,
        body: body.to_string(),
        options: Some(vec!["A1".into(), "B1".into(), "C1".into(), "D1".into()]),
        answer_label: "A".to_string(),
        explanation: None,
        exam_type: "jamb".to_string(),
        year,
        topic: None,
        subject: Some("biology".to_string()),
        question_type: "objective".to_string(),
        source_url: None,
    }
}

pub fn browser(backend: &Arc<FakeBackend>) -> (Arc<QuestionBrowser>, Arc<RecordingRenderer>) {
    let renderer = Arc::new(RecordingRenderer::default());
    let browser = QuestionBrowser::new(&Config::default(), backend.clone(), renderer.clone());
    (Arc::new(browser), renderer)
}
