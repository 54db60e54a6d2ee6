//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `browser` - 题目浏览控制器
//! - 持有选择状态、科目目录、筛选目录
//! - 编排"科目 → 筛选 → 题目"的固定加载顺序
//! - 调度导入 / 清空触发及其后续刷新
//!
//! ### `sequence` - 请求序号
//! - 为每次题目查询发号，丢弃过期响应
//!
//! ### `trigger_gate` - 触发闸门
//! - 导入 / 清空执行期间拒绝重入
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::QuestionBrowser
//!     ↓
//! services (能力层：subjects / filters / questions / ingest / reset)
//!     ↓
//! clients::QuestionBackend (HTTP 边界)
//! ```

pub mod browser;
pub mod sequence;
pub mod trigger_gate;

pub use browser::{FetchOutcome, QuestionBrowser, ResetOutcome, StartupReport};
pub use sequence::RequestSequence;
pub use trigger_gate::{GateGuard, TriggerGate};
