use super::question::QuestionRecord;

/// 一次题目查询的结果，渲染器只依据它绘制列表
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// 过滤后至少一条
    Ok(Vec<QuestionRecord>),
    /// 查询成功但没有匹配项
    Empty,
    /// 传输或解析失败
    Error(String),
}

impl FetchResult {
    /// 按搜索词过滤后归类
    pub fn from_records(records: Vec<QuestionRecord>, search_term: &str) -> Self {
        let matched: Vec<QuestionRecord> = records
            .into_iter()
            .filter(|q| q.matches_search(search_term))
            .collect();

        if matched.is_empty() {
            FetchResult::Empty
        } else {
            FetchResult::Ok(matched)
        }
    }

    pub fn records(&self) -> &[QuestionRecord] {
        match self {
            FetchResult::Ok(records) => records,
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FetchResult::Error(_))
    }
}
