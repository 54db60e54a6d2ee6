use serde::Deserialize;

/// 可选科目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectEntry {
    pub display_name: String,
    /// 由 display_name 小写得到，目录内唯一
    pub key: String,
    /// 仅 MySchool 数据源使用的远程地址
    pub source_locator: Option<String>,
}

impl SubjectEntry {
    pub fn new(display_name: impl Into<String>, source_locator: Option<String>) -> Self {
        let display_name = display_name.into();
        Self {
            key: display_name.to_lowercase(),
            display_name,
            source_locator: source_locator.filter(|url| !url.trim().is_empty()),
        }
    }
}

/// `/myschool-subjects` 的单项
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectPayload {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<SubjectPayload> for SubjectEntry {
    fn from(payload: SubjectPayload) -> Self {
        SubjectEntry::new(payload.name, payload.url)
    }
}

/// 科目目录
///
/// 每次加载成功后整体替换，从不局部更新
#[derive(Debug, Clone, Default)]
pub struct SubjectCatalog {
    entries: Vec<SubjectEntry>,
    loaded: bool,
}

impl SubjectCatalog {
    /// 由后端返回的列表构建，重复 key 只保留第一次出现
    pub fn from_entries(entries: impl IntoIterator<Item = SubjectEntry>) -> Self {
        let mut unique: Vec<SubjectEntry> = Vec::new();
        for entry in entries {
            if !unique.iter().any(|e| e.key == entry.key) {
                unique.push(entry);
            }
        }
        Self {
            entries: unique,
            loaded: true,
        }
    }

    pub fn entries(&self) -> &[SubjectEntry] {
        &self.entries
    }

    /// 是否至少成功加载过一次
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&SubjectEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 默认科目：优先 `preferred`，否则第一项
    pub fn default_key(&self, preferred: &str) -> Option<&str> {
        self.get(preferred)
            .or_else(|| self.entries.first())
            .map(|e| e.key.as_str())
    }

    /// 该 key 能否用于查询题目
    ///
    /// 目录从未加载时容忍占位科目；已加载后必须在目录内
    pub fn accepts(&self, key: &str) -> bool {
        !self.loaded || self.contains(key)
    }
}
