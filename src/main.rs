use anyhow::Result;
use past_questions_client::services::RESET_PROMPT;
use past_questions_client::utils::logging::log_startup;
use past_questions_client::{
    logger, AppResult, Config, Confirmation, ConsoleRenderer, HttpBackend, IngestError,
    IngestSource, QuestionBrowser,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
命令:
  exam <jamb|waec|...>      切换考试类型
  subject <key>             切换科目
  year <yyyy|all>           年份筛选
  topic <name|all>          知识点筛选
  search [text]             题干搜索（留空清除）
  ingest <myschool|aloc>    触发导入
  reset                     清空题库（需确认）
  show <n>                  显示/隐藏第 n 题解析
  subjects                  列出科目
  help                      显示本帮助
  quit                      退出";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load("client.toml")?;

    // 初始化日志
    logger::init(config.verbose_logging);
    log_startup(&config);

    let renderer = Arc::new(ConsoleRenderer::new()?);
    let browser = Arc::new(build_browser(&config, renderer.clone())?);

    // 启动：科目 → 筛选 → 题目
    browser.load_subjects().await;
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "exam" => match exam_tag(arg) {
                Some(tag) => {
                    let b = browser.clone();
                    let tag = tag.to_string();
                    tokio::spawn(async move { b.select_exam_type(&tag).await });
                }
                None => println!("请指定考试类型，例如: exam waec"),
            },
            "subject" => {
                let b = browser.clone();
                let key = arg.to_string();
                tokio::spawn(async move { b.select_subject(&key).await });
            }
            "year" => match parse_filter(arg).map(|y| y.parse::<i32>()).transpose() {
                Ok(year) => {
                    let b = browser.clone();
                    tokio::spawn(async move { b.select_year(year).await });
                }
                Err(_) => println!("无效年份: {}", arg),
            },
            "topic" => {
                let b = browser.clone();
                let topic = parse_filter(arg).map(str::to_string);
                tokio::spawn(async move { b.select_topic(topic).await });
            }
            "search" => {
                let b = browser.clone();
                let term = arg.to_string();
                tokio::spawn(async move { b.set_search_term(&term).await });
            }
            "ingest" => match arg.parse::<IngestSource>() {
                Ok(source) => {
                    let b = browser.clone();
                    tokio::spawn(async move {
                        if let Err(IngestError::Busy) = b.ingest(source).await {
                            println!("Ingesting... 请等待当前导入完成");
                        }
                    });
                }
                Err(e) => println!("{}", e),
            },
            "reset" => {
                println!("{} [y/N]", RESET_PROMPT);
                let answer = lines.next_line().await?.unwrap_or_default();
                let _ = browser.reset_all(Confirmation::from_answer(&answer)).await;
            }
            "show" => match arg.parse::<usize>() {
                Ok(n) if renderer.toggle_explanation(n) => {}
                _ => println!("没有第 {} 题", arg),
            },
            "subjects" => {
                for entry in browser.subjects().entries() {
                    println!("  {:<24} {}", entry.key, entry.display_name);
                }
            }
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => println!("未知命令: {} (输入 help 查看)", other),
        }
    }

    Ok(())
}

fn build_browser(config: &Config, renderer: Arc<ConsoleRenderer>) -> AppResult<QuestionBrowser> {
    let backend = Arc::new(HttpBackend::new(config)?);
    Ok(QuestionBrowser::new(config, backend, renderer))
}

/// "all" 或空值表示不筛选
fn parse_filter(arg: &str) -> Option<&str> {
    match arg {
        "" | "all" => None,
        value => Some(value),
    }
}

/// 考试类型不能为空
fn exam_tag(arg: &str) -> Option<&str> {
    Some(arg.trim()).filter(|tag| !tag.is_empty())
}
