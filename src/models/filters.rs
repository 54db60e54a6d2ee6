use serde::Deserialize;

/// 年份 / 知识点筛选目录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCatalog {
    pub years: Vec<i32>,
    pub topics: Vec<String>,
}

/// `/filters` 响应，额外字段忽略
#[derive(Debug, Deserialize)]
pub struct FiltersPayload {
    #[serde(default)]
    pub years: Vec<Option<i32>>,
    #[serde(default)]
    pub topics: Vec<Option<String>>,
}

impl From<FiltersPayload> for FilterCatalog {
    fn from(payload: FiltersPayload) -> Self {
        let mut years = Vec::new();
        for year in payload.years.into_iter().flatten() {
            if !years.contains(&year) {
                years.push(year);
            }
        }

        let mut topics: Vec<String> = Vec::new();
        for topic in payload.topics.into_iter().flatten() {
            if !topic.is_empty() && !topics.contains(&topic) {
                topics.push(topic);
            }
        }

        Self { years, topics }
    }
}

impl FilterCatalog {
    pub fn has_year(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_deduplicated_in_order() {
        let payload: FiltersPayload = serde_json::from_str(
            r#"{"subjects": ["Biology"], "years": [2016, 2015, 2016, null], "topics": ["Ecology", "Cells", "Ecology", null], "question_types": []}"#,
        )
        .unwrap();

        let catalog = FilterCatalog::from(payload);
        assert_eq!(catalog.years, vec![2016, 2015]);
        assert_eq!(catalog.topics, vec!["Ecology".to_string(), "Cells".to_string()]);
    }
}
