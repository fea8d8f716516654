//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量申请和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量申请处理器
//! - 管理应用生命周期（初始化、运行、清理）
//! - 持有并最终关闭浏览器会话
//! - 顺序申请职位，控制申请上限和职位间等待
//! - 输出全局统计信息
//!
//! ### `setup_check` - 运行前检查
//! - 校验配置文件、招聘网站、简历和日志目录
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Job>)
//!     ↓
//! workflow::ApplyFlow (处理单个 Job)
//!     ↓
//! services (能力层：delay / locator / search / result_log)
//!     ↓
//! infrastructure (基础设施：BrowserSession)
//! ```

pub mod batch_processor;
pub mod setup_check;

// 重新导出主要类型
pub use batch_processor::{planned_attempts, run_batch, App};
