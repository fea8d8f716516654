//! 批量申请处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量申请和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：加载并校验 config.json（失败则不做任何申请）
//! 2. **会话管理**：连接或启动浏览器，等待人工登录
//! 3. **职位搜索**：委托 `JobSearch` 获取职位列表
//! 4. **顺序申请**：一次只处理一个职位，职位之间随机等待
//! 5. **故障隔离**：单个职位出错（包括 panic）只计为 failed，不中断批次
//! 6. **中断处理**：Ctrl-C 只在职位之间生效，已完成的部分照常统计
//! 7. **资源释放**：无论正常结束、搜索失败、panic 还是收到中断，浏览器会话都只关闭一次

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::browser;
use crate::config::{ApplicationConfig, Config};
use crate::error::AppError;
use crate::infrastructure::{BrowserSession, ChromeSession};
use crate::models::{ApplyStatus, BatchSummary, Job, Portal};
use crate::services::{CsvResultLog, JobSearch, ResultSink};
use crate::utils::logging::{
    log_interrupted, log_jobs_loaded, log_startup, print_final_stats,
};
use crate::workflow::{ApplyCtx, ApplyFlow};

/// 应用主结构
pub struct App {
    config: Config,
    app_config: ApplicationConfig,
}

impl App {
    /// 初始化应用：加载配置，失败直接返回
    pub fn initialize(config: Config) -> Result<Self, AppError> {
        let app_config = ApplicationConfig::load(&config.config_path)?;
        info!("✓ 已加载配置: {}", config.config_path.display());

        Ok(Self { config, app_config })
    }

    /// 直接使用已加载的配置创建
    pub fn with_config(config: Config, app_config: ApplicationConfig) -> Self {
        Self { config, app_config }
    }

    pub fn app_config(&self) -> &ApplicationConfig {
        &self.app_config
    }

    /// 运行应用主逻辑
    ///
    /// 返回 None 表示在开始申请前被中断
    pub async fn run(&self) -> Result<Option<BatchSummary>> {
        log_startup(&self.app_config.job_portal, self.app_config.max_applications());

        let session = self.open_session().await?;
        let sink: Arc<dyn ResultSink> = Arc::new(CsvResultLog::with_path(&self.app_config.log_file));

        self.execute(&session, sink).await
    }

    /// 在给定会话上执行 登录确认 → 搜索 → 批量申请，结束后关闭会话
    ///
    /// Ctrl-C 不会打断正在申请的职位，只会在下一个职位开始前停止
    pub async fn execute<S>(&self, session: &S, sink: Arc<dyn ResultSink>) -> Result<Option<BatchSummary>>
    where
        S: BrowserSession,
    {
        let interrupt = CancellationToken::new();
        let _watcher = watch_ctrl_c(interrupt.clone());

        self.execute_until(session, sink, &interrupt).await
    }

    /// 同 [`execute`](Self::execute)，中断信号由调用方提供
    pub async fn execute_until<S>(
        &self,
        session: &S,
        sink: Arc<dyn ResultSink>,
        interrupt: &CancellationToken,
    ) -> Result<Option<BatchSummary>>
    where
        S: BrowserSession,
    {
        let outcome = AssertUnwindSafe(self.search_and_apply(session, sink, interrupt))
            .catch_unwind()
            .await;

        // 所有退出路径都要释放会话，包括 panic
        if let Err(e) = session.close().await {
            error!("关闭浏览器会话失败: {}", e);
        }

        match outcome {
            Ok(result) => result,
            Err(panic_info) => std::panic::resume_unwind(panic_info),
        }
    }

    async fn search_and_apply<S>(
        &self,
        session: &S,
        sink: Arc<dyn ResultSink>,
        interrupt: &CancellationToken,
    ) -> Result<Option<BatchSummary>>
    where
        S: BrowserSession,
    {
        let prompt = format!(
            "请在浏览器中登录 {}，完成后在此按回车继续...",
            self.app_config.job_portal
        );
        tokio::select! {
            biased;
            _ = interrupt.cancelled() => return Ok(None),
            ready = session.await_operator_ready(&prompt) => ready?,
        }

        let job_search = JobSearch::new();
        let jobs = tokio::select! {
            biased;
            _ = interrupt.cancelled() => return Ok(None),
            jobs = job_search.search(session, &self.app_config) => jobs?,
        };
        if jobs.is_empty() {
            warn!("⚠️ 没有找到可申请的职位，程序结束");
            return Ok(Some(BatchSummary::default()));
        }

        let max_applications = self.app_config.max_applications();
        log_jobs_loaded(jobs.len(), planned_attempts(jobs.len(), max_applications));

        let flow = ApplyFlow::new(self.app_config.clone(), sink)?;
        let summary = run_batch(session, &jobs, &flow, max_applications, interrupt).await;

        print_final_stats(&summary, &self.app_config.log_file.to_string_lossy());
        Ok(Some(summary))
    }

    /// 连接已有浏览器或启动新浏览器
    async fn open_session(&self) -> Result<ChromeSession> {
        let start_url = start_url(&self.app_config.job_portal);
        match self.config.browser_debug_port {
            Some(port) => browser::connect_to_browser(port, &start_url).await,
            None => {
                browser::launch_browser(self.config.chrome_executable.as_deref(), &start_url).await
            }
        }
    }
}

/// 顺序申请一批职位
///
/// - 按输入顺序处理，序号从 1 开始
/// - 达到 `max_applications` 后停止
/// - 相邻两次申请之间按职位间延迟等待，最后一次之后不等待
/// - 单个职位 panic 计为 failed 并补写结果记录，继续下一个
/// - 收到中断后不再开始新的职位；正在申请的职位照常完成并写入记录
pub async fn run_batch<S>(
    session: &S,
    jobs: &[Job],
    flow: &ApplyFlow,
    max_applications: Option<usize>,
    interrupt: &CancellationToken,
) -> BatchSummary
where
    S: BrowserSession,
{
    let planned = planned_attempts(jobs.len(), max_applications);
    let batch_delay = flow.batch_delay();
    let mut summary = BatchSummary::default();

    for (index, job) in jobs.iter().take(planned).enumerate() {
        let ctx = ApplyCtx::new(index + 1, planned);
        if interrupt.is_cancelled() {
            warn!("{} ⛔ 已中断，跳过剩余 {} 个职位", ctx, planned - index);
            break;
        }
        info!("\n{} {}", ctx, "─".repeat(30));

        let status = match AssertUnwindSafe(flow.attempt(session, job, &ctx))
            .catch_unwind()
            .await
        {
            Ok(status) => status,
            Err(panic_info) => {
                let message = panic_message(panic_info.as_ref());
                error!("{} ❌ 申请流程 panic: {}", ctx, message);
                flow.write_record(&ctx, job, ApplyStatus::Failed, Some(message))
                    .await;
                ApplyStatus::Failed
            }
        };
        summary.record(status);

        if index + 1 < planned {
            info!(
                "{} 💤 等待 {:.0}-{:.0} 秒后处理下一个职位",
                ctx,
                batch_delay.min(),
                batch_delay.max()
            );
            tokio::select! {
                _ = batch_delay.pause() => {}
                _ = interrupt.cancelled() => {}
            }
        }
    }

    summary
}

/// 收到 Ctrl-C 时触发中断；返回值被丢弃时停止监听
fn watch_ctrl_c(interrupt: CancellationToken) -> SignalWatcher {
    SignalWatcher(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log_interrupted();
            interrupt.cancel();
        }
    }))
}

struct SignalWatcher(JoinHandle<()>);

impl Drop for SignalWatcher {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// 实际会尝试的职位数
pub fn planned_attempts(total: usize, max_applications: Option<usize>) -> usize {
    max_applications.map_or(total, |max| max.min(total))
}

/// 浏览器打开后的第一个页面（用于人工登录）
fn start_url(job_portal: &str) -> String {
    match Portal::parse(job_portal) {
        Some(portal) => format!("{}/", portal.origin()),
        None => format!("https://www.{}.com/", job_portal.trim().to_lowercase()),
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planned_attempts_respects_cap() {
        assert_eq!(planned_attempts(5, None), 5);
        assert_eq!(planned_attempts(5, Some(1)), 1);
        assert_eq!(planned_attempts(2, Some(10)), 2);
        assert_eq!(planned_attempts(0, Some(3)), 0);
    }

    #[test]
    fn start_url_uses_portal_origin() {
        assert_eq!(start_url("LinkedIn"), "https://www.linkedin.com/");
        assert_eq!(start_url("Glassdoor"), "https://www.glassdoor.com/");
    }

    #[test]
    fn panic_message_from_payloads() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(42);
        assert_eq!(panic_message(boxed.as_ref()), "Unknown panic");
    }
}
