//! 导入任务触发 - 业务能力层
//!
//! 只负责校验本地选择并调用后端导入接口；
//! 防重入与成功后的刷新由编排层负责

use crate::clients::{AlocRequest, MySchoolRequest, QuestionBackend};
use crate::config::Config;
use crate::error::{ApiError, IngestError, ValidationError};
use crate::models::{ExamType, SubjectEntry};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// 导入数据源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestSource {
    /// MySchool 抓取，需要科目地址
    MySchool,
    /// ALOC 接口，只需科目名称
    Aloc,
}

impl IngestSource {
    pub fn as_str(self) -> &'static str {
        match self {
            IngestSource::MySchool => "myschool",
            IngestSource::Aloc => "aloc",
        }
    }
}

impl fmt::Display for IngestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngestSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "myschool" | "primary" => Ok(IngestSource::MySchool),
            "aloc" | "secondary" => Ok(IngestSource::Aloc),
            other => Err(format!("未知数据源: {}", other)),
        }
    }
}

pub struct IngestionService {
    backend: Arc<dyn QuestionBackend>,
    myschool_limit: u32,
    myschool_min_year: i32,
    aloc_count: u32,
}

impl IngestionService {
    pub fn new(backend: Arc<dyn QuestionBackend>, config: &Config) -> Self {
        Self {
            backend,
            myschool_limit: config.myschool_limit,
            myschool_min_year: config.myschool_min_year,
            aloc_count: config.aloc_count,
        }
    }

    /// 触发一次导入
    ///
    /// 校验失败时不发出任何请求
    ///
    /// # 返回
    /// 成功时返回后端的提示信息
    pub async fn ingest(
        &self,
        source: IngestSource,
        subject: Option<&SubjectEntry>,
        exam_type: &ExamType,
    ) -> Result<String, IngestError> {
        let subject = subject.ok_or(ValidationError::NoSubjectSelected)?;

        info!("📥 开始导入: {} / {} ({})", source, subject.display_name, exam_type);

        let response = match source {
            IngestSource::MySchool => {
                let locator = subject
                    .source_locator
                    .as_ref()
                    .ok_or(ValidationError::MissingLocator)?;
                let request = MySchoolRequest {
                    subject_url: locator.clone(),
                    subject_name: subject.display_name.clone(),
                    limit: self.myschool_limit,
                    min_year: self.myschool_min_year,
                    exam_type: exam_type.as_str().to_string(),
                };
                self.backend.scrape_myschool(&request).await
            }
            IngestSource::Aloc => {
                let request = AlocRequest {
                    subject: subject.display_name.clone(),
                    count: self.aloc_count,
                };
                self.backend.fetch_aloc(&request).await
            }
        };

        match response {
            Ok(job) => {
                let message = job.text().unwrap_or("Ingestion complete").to_string();
                info!("✓ 导入完成: {}", message);
                Ok(message)
            }
            Err(e) => {
                warn!("⚠️ 导入失败 ({}): {}", source, e);
                Err(classify_failure(source, e))
            }
        }
    }
}

/// 只有 MySchool 抓取的 403 属于上游拒绝；ALOC 的任何失败都是普通失败
fn classify_failure(source: IngestSource, err: ApiError) -> IngestError {
    let denied = source == IngestSource::MySchool && matches!(err, ApiError::Forbidden { .. });
    if denied {
        IngestError::UpstreamDenied
    } else {
        IngestError::from(err)
    }
}
