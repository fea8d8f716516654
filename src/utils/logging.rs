/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::models::{ApplyStatus, BatchSummary};

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则 verbose 时为 debug，默认 info。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("job_auto_apply={},warn", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(portal: &str, max_applications: Option<usize>) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 自动申请职位");
    info!("🌐 招聘网站: {}", portal);
    match max_applications {
        Some(max) => info!("📊 本次最多申请: {} 个", max),
        None => info!("📊 本次申请数量: 不限"),
    }
    info!("{}", "=".repeat(60));
}

/// 记录职位加载信息
pub fn log_jobs_loaded(total: usize, planned: usize) {
    info!("✓ 找到 {} 个职位", total);
    if planned < total {
        info!("📋 受申请上限限制，将处理前 {} 个", planned);
    }
    info!("💡 职位之间会随机等待，请勿操作浏览器\n");
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &BatchSummary, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.success, summary.total());
    info!("🟡 未完成表单: {}", summary.count(ApplyStatus::Partial));
    info!("👤 需人工申请: {}", summary.count(ApplyStatus::ManualRequired));
    info!("❌ 失败: {}", summary.failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 记录运行被中断
pub fn log_interrupted() {
    warn!("\n{}", "=".repeat(60));
    warn!("⛔ 收到中断信号，当前职位完成后停止申请并关闭浏览器");
    warn!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("软件工程师", 2), "软件...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
