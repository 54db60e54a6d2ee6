use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 后端 API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 导入任务错误
    #[error("导入错误: {0}")]
    Ingest(#[from] IngestError),
    /// 清空题库错误
    #[error("清空错误: {0}")]
    Reset(#[from] ResetError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// HTTP 边界错误
///
/// 传输层细节只在这里被归类一次，调用方只按种类分支
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接、超时）
    #[error("API请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 响应无法解析
    #[error("响应解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// HTTP 403
    #[error("请求被拒绝 ({endpoint}): {message:?}")]
    Forbidden {
        endpoint: String,
        message: Option<String>,
    },
    /// 其他非 2xx 响应
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BackendReported {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
}

impl ApiError {
    /// 后端在响应体中给出的说明（如有）
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Forbidden { message, .. } | ApiError::BackendReported { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// 用于结果占位的简短原因
    pub fn reason(&self) -> String {
        match self {
            ApiError::Transport { .. } => "transport".to_string(),
            ApiError::Decode { .. } => "decode".to_string(),
            ApiError::Forbidden { .. } => "forbidden".to_string(),
            ApiError::BackendReported { status, .. } => format!("status {}", status),
        }
    }
}

/// 导入任务错误
#[derive(Debug, Error)]
pub enum IngestError {
    /// 本地选择不完整，未发出任何请求
    #[error("{0}")]
    Validation(ValidationError),
    /// 上游站点拒绝访问（HTTP 403），应改用另一数据源
    #[error("Cloudflare is blocking the backend server's IP address. Please use the ALOC source for ingestion, or run the app locally to use MySchool.")]
    UpstreamDenied,
    /// 其他失败，携带后端说明
    #[error("{message}")]
    Failed { message: String },
    /// 已有导入任务在进行中
    #[error("An ingestion is already running.")]
    Busy,
}

impl IngestError {
    /// 只有上游拒绝需要提示切换数据源
    pub fn suggests_alternate_source(&self) -> bool {
        matches!(self, IngestError::UpstreamDenied)
    }
}

/// 本地校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a subject.")]
    NoSubjectSelected,
    #[error("Subject URL not found for MySchool ingestion.")]
    MissingLocator,
}

/// 清空题库错误
#[derive(Debug, Error)]
pub enum ResetError {
    #[error("Failed to clear database")]
    Failed(#[source] ApiError),
    #[error("A reset is already running.")]
    Busy,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl From<ValidationError> for IngestError {
    fn from(err: ValidationError) -> Self {
        IngestError::Validation(err)
    }
}

/// 通用导入失败；403 是否属于上游拒绝由调用方按数据源判断
impl From<ApiError> for IngestError {
    fn from(err: ApiError) -> Self {
        IngestError::Failed {
            message: err
                .backend_message()
                .unwrap_or("Ingestion failed")
                .to_string(),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
