//! # Job Auto Apply
//!
//! 在招聘网站上自动搜索职位并通过浏览器提交申请，每次申请的结果写入 CSV 日志
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 连接或启动浏览器
//! - `infrastructure/` - 会话能力接口（`BrowserSession` / `PageElement`）及 chromiumoxide 实现
//!
//! ### ② 业务能力层（Services）
//! - `delay` - 有界随机等待
//! - `element_locator` - 多策略元素定位
//! - `job_search` - 按招聘网站搜索职位
//! - `result_log` - 追加申请记录
//!
//! ### ③ 流程层（Workflow）
//! - `ApplyCtx` - 上下文封装（第几个职位）
//! - `ApplyFlow` - 单个职位的申请状态机
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量申请、申请上限、故障隔离、会话释放
//! - `orchestrator/setup_check` - 运行前检查

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{ApplicationConfig, Config, Filters};
pub use error::{AppError, BrowserError, ConfigError, DelayError, LogError};
pub use infrastructure::{BrowserSession, ChromeSession, PageElement, QueryScope};
pub use models::{ApplyStatus, BatchSummary, Job, LocatorSpec, LogRecord, Portal};
pub use orchestrator::{run_batch, App};
pub use services::{CsvResultLog, JobSearch, ResultSink};
pub use workflow::{ApplyCtx, ApplyFlow};
