//! 题库后端 API 客户端
//!
//! 封装所有与后端 HTTP 接口相关的调用逻辑。
//! 传输层的状态码、解析失败等细节在这里被一次性归类为 `ApiError`。

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{FilterCatalog, FiltersPayload, QuestionQuery, QuestionRecord, SubjectEntry, SubjectPayload};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const NO_QUERY: &[(&str, &str)] = &[];

const FILTERS: &str = "/filters";
const SUBJECTS: &str = "/myschool-subjects";
const QUESTIONS: &str = "/questions";
const SCRAPE_MYSCHOOL: &str = "/scrape/myschool";
const FETCH_ALOC: &str = "/fetch-aloc";
const CLEAR_QUESTIONS: &str = "/clear-questions";

/// 导入 / 清空类接口的响应体
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl JobMessage {
    /// 优先 message，其次 detail
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.detail.as_deref())
    }
}

/// `/scrape/myschool` 参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MySchoolRequest {
    pub subject_url: String,
    pub subject_name: String,
    pub limit: u32,
    pub min_year: i32,
    pub exam_type: String,
}

/// `/fetch-aloc` 参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlocRequest {
    pub subject: String,
    pub count: u32,
}

/// 后端能力边界
///
/// 控制器与各服务只依赖此 trait，测试中以假实现替换
#[async_trait]
pub trait QuestionBackend: Send + Sync {
    async fn filters(&self) -> Result<FilterCatalog, ApiError>;

    async fn subjects(&self) -> Result<Vec<SubjectEntry>, ApiError>;

    async fn questions(&self, query: &QuestionQuery) -> Result<Vec<QuestionRecord>, ApiError>;

    async fn scrape_myschool(&self, request: &MySchoolRequest) -> Result<JobMessage, ApiError>;

    async fn fetch_aloc(&self, request: &AlocRequest) -> Result<JobMessage, ApiError>;

    async fn clear_questions(&self) -> Result<JobMessage, ApiError>;
}

/// 基于 reqwest 的后端客户端
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// 创建新的后端客户端
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: config.api_base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 构建 GET 请求，参数编码为查询串
    fn build_request<Q>(&self, endpoint: &str, query: &Q) -> Result<reqwest::Request, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        self.client
            .get(format!("{}{}", self.base_url, endpoint))
            .query(query)
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source: e,
            })
    }

    /// 发出 GET 请求并解码 JSON 响应
    async fn get<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.build_request(endpoint, query)?;
        debug!("GET {}", request.url());

        let transport = |e: reqwest::Error| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source: e,
        };

        let response = self.client.execute(request).await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        debug!("{} -> {} ({} 字节)", endpoint, status, body.len());

        decode_response(endpoint, status, &body)
    }
}

#[async_trait]
impl QuestionBackend for HttpBackend {
    async fn filters(&self) -> Result<FilterCatalog, ApiError> {
        let payload: FiltersPayload = self.get(FILTERS, NO_QUERY).await?;
        Ok(payload.into())
    }

    async fn subjects(&self) -> Result<Vec<SubjectEntry>, ApiError> {
        let payload: Vec<SubjectPayload> = self.get(SUBJECTS, NO_QUERY).await?;
        Ok(payload.into_iter().map(SubjectEntry::from).collect())
    }

    async fn questions(&self, query: &QuestionQuery) -> Result<Vec<QuestionRecord>, ApiError> {
        self.get(QUESTIONS, query).await
    }

    async fn scrape_myschool(&self, request: &MySchoolRequest) -> Result<JobMessage, ApiError> {
        self.get(SCRAPE_MYSCHOOL, request).await
    }

    async fn fetch_aloc(&self, request: &AlocRequest) -> Result<JobMessage, ApiError> {
        self.get(FETCH_ALOC, request).await
    }

    async fn clear_questions(&self) -> Result<JobMessage, ApiError> {
        self.get(CLEAR_QUESTIONS, NO_QUERY).await
    }
}

/// 先看状态码再解码：非 2xx 的响应体（如 Cloudflare 的 HTML 页面）不会被当成 JSON 解析
fn decode_response<T: DeserializeOwned>(
    endpoint: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(classify_status(endpoint, status, body));
    }

    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

/// 非 2xx 响应归类：403 单独成类，其余携带后端说明
pub fn classify_status(endpoint: &str, status: StatusCode, body: &str) -> ApiError {
    let message = extract_message(body);
    if status == StatusCode::FORBIDDEN {
        ApiError::Forbidden {
            endpoint: endpoint.to_string(),
            message,
        }
    } else {
        ApiError::BackendReported {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        }
    }
}

/// 从错误响应体中取出 `detail` 或 `message`
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_is_its_own_kind() {
        let err = classify_status(
            "/scrape/myschool",
            StatusCode::FORBIDDEN,
            r#"{"detail": "MySchool is blocking this server's IP address"}"#,
        );
        assert!(matches!(err, ApiError::Forbidden { .. }));
        assert_eq!(
            err.backend_message(),
            Some("MySchool is blocking this server's IP address")
        );
    }

    #[test]
    fn other_statuses_carry_detail() {
        let err = classify_status("/fetch-aloc", StatusCode::BAD_REQUEST, r#"{"detail": "Failed to fetch data"}"#);
        match err {
            ApiError::BackendReported { status, message, .. } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Failed to fetch data"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_has_no_message() {
        let err = classify_status("/questions", StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.backend_message(), None);
        assert_eq!(err.reason(), "status 502");
    }

    #[test]
    fn structured_detail_is_ignored() {
        // FastAPI 校验错误的 detail 是数组
        assert_eq!(extract_message(r#"{"detail": [{"loc": ["query"]}]}"#), None);
        assert_eq!(extract_message(r#"{"message": "ok"}"#).as_deref(), Some("ok"));
    }

    fn backend() -> HttpBackend {
        HttpBackend::new(&Config {
            api_base_url: "http://backend.test/".to_string(),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn question_query_leaves_unset_filters_out() {
        let backend = backend();
        let mut query = QuestionQuery {
            subject: "biology".to_string(),
            exam_type: "jamb".to_string(),
            year: None,
            topic: None,
        };

        let request = backend.build_request(QUESTIONS, &query).unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://backend.test/questions?subject=biology&exam_type=jamb"
        );

        query.year = Some(2015);
        query.topic = Some("Cell Biology".to_string());
        let request = backend.build_request(QUESTIONS, &query).unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://backend.test/questions?subject=biology&exam_type=jamb&year=2015&topic=Cell+Biology"
        );
        assert_eq!(request.method(), &reqwest::Method::GET);
    }

    #[test]
    fn ingest_requests_use_backend_parameter_names() {
        let backend = backend();

        let scrape = MySchoolRequest {
            subject_url: "https://myschool.ng/classroom/biology".to_string(),
            subject_name: "Biology".to_string(),
            limit: 200,
            min_year: 2000,
            exam_type: "waec".to_string(),
        };
        let request = backend.build_request(SCRAPE_MYSCHOOL, &scrape).unwrap();
        assert_eq!(request.url().path(), "/scrape/myschool");
        assert_eq!(
            request.url().query(),
            Some("subject_url=https%3A%2F%2Fmyschool.ng%2Fclassroom%2Fbiology&subject_name=Biology&limit=200&min_year=2000&exam_type=waec")
        );

        let aloc = AlocRequest {
            subject: "English Language".to_string(),
            count: 100,
        };
        let request = backend.build_request(FETCH_ALOC, &aloc).unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://backend.test/fetch-aloc?subject=English+Language&count=100"
        );
    }

    #[test]
    fn catalog_and_clear_requests_carry_no_query() {
        let backend = backend();
        for endpoint in [FILTERS, SUBJECTS, CLEAR_QUESTIONS] {
            let request = backend.build_request(endpoint, NO_QUERY).unwrap();
            assert_eq!(request.url().path(), endpoint);
            assert_eq!(request.url().query(), None);
        }
    }

    #[test]
    fn status_is_checked_before_decoding() {
        let html = "<html><title>Attention Required! | Cloudflare</title></html>";
        let err = decode_response::<JobMessage>(SCRAPE_MYSCHOOL, StatusCode::FORBIDDEN, html).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { message: None, .. }));

        let err = decode_response::<JobMessage>(FETCH_ALOC, StatusCode::OK, html).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));

        let ok = decode_response::<JobMessage>(FETCH_ALOC, StatusCode::OK, r#"{"message": "Added 5"}"#).unwrap();
        assert_eq!(ok.text(), Some("Added 5"));
    }

    #[test]
    fn job_message_prefers_message() {
        let msg: JobMessage = serde_json::from_str(r#"{"message": "Added 3", "detail": "x"}"#).unwrap();
        assert_eq!(msg.text(), Some("Added 3"));

        let msg: JobMessage = serde_json::from_str(r#"{"detail": "only detail"}"#).unwrap();
        assert_eq!(msg.text(), Some("only detail"));
    }
}
