use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 客户端配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 API 根地址
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 启动时的考试类型
    pub default_exam_type: String,
    /// 默认科目 key（小写）
    pub default_subject: String,
    // --- 导入任务参数 ---
    pub myschool_limit: u32,
    pub myschool_min_year: i32,
    pub aloc_count: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 30,
            default_exam_type: "jamb".to_string(),
            default_subject: "biology".to_string(),
            myschool_limit: 200,
            myschool_min_year: 2000,
            aloc_count: 100,
            verbose_logging: false,
        }
    }
}

/// TOML 文件中可出现的字段，缺省字段沿用默认值
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    default_exam_type: Option<String>,
    default_subject: Option<String>,
    myschool_limit: Option<u32>,
    myschool_min_year: Option<i32>,
    aloc_count: Option<u32>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（存在时）→ 环境变量
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = Self::from_file(path.as_ref())?;
        Ok(base.with_env())
    }

    /// 只读取环境变量
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::ParseFailed { source, .. } => ConfigError::ParseFailed {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content).map_err(|e| ConfigError::ParseFailed {
            path: String::new(),
            source: e,
        })?;

        let default = Self::default();
        Ok(Self {
            api_base_url: file.api_base_url.unwrap_or(default.api_base_url),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(default.request_timeout_secs),
            default_exam_type: file.default_exam_type.unwrap_or(default.default_exam_type),
            default_subject: file.default_subject.unwrap_or(default.default_subject),
            myschool_limit: file.myschool_limit.unwrap_or(default.myschool_limit),
            myschool_min_year: file.myschool_min_year.unwrap_or(default.myschool_min_year),
            aloc_count: file.aloc_count.unwrap_or(default.aloc_count),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }

    fn with_env(self) -> Self {
        Self {
            api_base_url: std::env::var("PQ_API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_secs: std::env::var("PQ_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            default_exam_type: std::env::var("PQ_DEFAULT_EXAM_TYPE").unwrap_or(self.default_exam_type),
            default_subject: std::env::var("PQ_DEFAULT_SUBJECT").unwrap_or(self.default_subject),
            myschool_limit: std::env::var("PQ_MYSCHOOL_LIMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.myschool_limit),
            myschool_min_year: std::env::var("PQ_MYSCHOOL_MIN_YEAR").ok().and_then(|v| v.parse().ok()).unwrap_or(self.myschool_min_year),
            aloc_count: std::env::var("PQ_ALOC_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.aloc_count),
            verbose_logging: std::env::var("PQ_VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}
