//! 终端渲染器
//!
//! 供命令行程序使用，把控制器的输出打印到标准输出

use super::card::QuestionCard;
use super::renderer::{
    Action, Notice, NoticeLevel, Renderer, SubjectListView, EMPTY_PLACEHOLDER, ERROR_PLACEHOLDER,
};
use crate::models::{FetchResult, FilterCatalog};
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashSet;

pub struct ConsoleRenderer {
    cards: Mutex<Vec<QuestionCard>>,
    busy: Mutex<HashSet<Action>>,
    tag_re: Regex,
    entity_re: Regex,
}

impl ConsoleRenderer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            cards: Mutex::new(Vec::new()),
            busy: Mutex::new(HashSet::new()),
            tag_re: Regex::new(r"<[^>]+>")?,
            entity_re: Regex::new(r"&(nbsp|amp|lt|gt|quot);")?,
        })
    }

    /// 切换第 `number` 张卡片（从 1 开始）的解析显示
    pub fn toggle_explanation(&self, number: usize) -> bool {
        let mut cards = self.cards.lock();
        let Some(card) = number.checked_sub(1).and_then(|i| cards.get_mut(i)) else {
            return false;
        };
        card.toggle_explanation();
        self.print_card(number, card);
        true
    }

    /// 动作是否处于执行中
    pub fn is_busy(&self, action: Action) -> bool {
        self.busy.lock().contains(&action)
    }

    /// 去掉 HTML 标签，便于终端阅读
    fn plain(&self, html: &str) -> String {
        let text = self.tag_re.replace_all(html, " ");
        let text = self.entity_re.replace_all(&text, |caps: &regex::Captures| {
            let decoded = match &caps[1] {
                "amp" => "&",
                "lt" => "<",
                "gt" => ">",
                "quot" => "\"",
                _ => " ",
            };
            decoded.to_string()
        });
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn print_card(&self, number: usize, card: &QuestionCard) {
        println!("\n#{} {}", number, card.meta);
        println!("{}", self.plain(&card.body));
        for option in &card.options {
            println!("    {}", self.plain(option));
        }
        if card.revealed {
            println!("  {}", card.answer_line);
            println!("  {}", self.plain(&card.explanation));
        } else {
            println!("  [{}: show {}]", card.toggle_label(), number);
        }
    }
}

impl Renderer for ConsoleRenderer {
    fn show_subjects(&self, view: &SubjectListView) {
        match view {
            SubjectListView::Entries { entries, selected } => {
                let names: Vec<String> = entries
                    .iter()
                    .map(|e| {
                        if &e.key == selected {
                            format!("[{}]", e.display_name)
                        } else {
                            e.display_name.clone()
                        }
                    })
                    .collect();
                println!("科目: {}", names.join(", "));
            }
            other => {
                if let Some(text) = other.placeholder() {
                    println!("科目: {}", text);
                }
            }
        }
    }

    fn show_filters(&self, catalog: &FilterCatalog, year: Option<i32>, topic: Option<&str>) {
        let years: Vec<String> = catalog.years.iter().map(|y| y.to_string()).collect();
        println!(
            "年份: All Years, {} (当前: {})",
            years.join(", "),
            year.map(|y| y.to_string()).unwrap_or_else(|| "All Years".to_string())
        );
        println!(
            "知识点: All Topics, {} (当前: {})",
            catalog.topics.join(", "),
            topic.unwrap_or("All Topics")
        );
    }

    fn show_results(&self, result: &FetchResult) {
        let mut cards = self.cards.lock();
        cards.clear();

        match result {
            FetchResult::Ok(records) => {
                cards.extend(records.iter().map(QuestionCard::from_record));
                for (i, card) in cards.iter().enumerate() {
                    self.print_card(i + 1, card);
                }
            }
            FetchResult::Empty => println!("{}", EMPTY_PLACEHOLDER),
            FetchResult::Error(_) => println!("{}", ERROR_PLACEHOLDER),
        }
    }

    fn show_title(&self, title: &str) {
        println!("\n=== {} ===", title);
    }

    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => println!("✓ {}", notice.text),
            NoticeLevel::Error => println!("❌ {}", notice.text),
        }
    }

    fn set_busy(&self, action: Action, busy: bool) {
        let mut set = self.busy.lock();
        if busy {
            set.insert(action);
            match action {
                Action::Ingest => println!("Ingesting..."),
                Action::Reset => println!("Clearing..."),
            }
        } else {
            set.remove(&action);
        }
    }
}
