//! # Past Questions Client
//!
//! 历年真题浏览客户端：从后端加载筛选目录与题目，按考试类型、科目、年份、
//! 知识点和搜索词缩小结果，并可触发远程导入任务补充题库。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 选择状态、科目目录、筛选目录、题目、查询结果，纯数据
//!
//! ### ② 边界层（Clients）
//! - `clients/` - `QuestionBackend` trait 与基于 reqwest 的 `HttpBackend`
//! - 传输细节在这里一次性归类为 `ApiError`
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 每个组件一个能力：科目加载、筛选加载、题目查询、导入、清空
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - `QuestionBrowser`，持有状态、保证加载顺序、丢弃过期响应
//!
//! ### 展示（View）
//! - `view/` - `Renderer` 接口、题目卡片、终端实现
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod view;

// 重新导出常用类型
pub use clients::{HttpBackend, QuestionBackend};
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, IngestError, ResetError, ValidationError};
pub use models::{FetchResult, QuestionRecord, SelectionState, SubjectEntry};
pub use orchestrator::{FetchOutcome, QuestionBrowser, ResetOutcome, StartupReport};
pub use services::{Confirmation, IngestSource};
pub use view::{ConsoleRenderer, Renderer};
