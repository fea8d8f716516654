//! 职位申请流程 - 流程层
//!
//! 核心职责：定义"一个职位"的完整申请流程
//!
//! 流程顺序：
//! 1. 打开职位页面
//! 2. 查找申请按钮 → 找不到则 manual_required
//! 3. 打开表单 → 上传简历（可选）
//! 4. 查找提交按钮 → 找到则 success，否则 partial
//!
//! 任一步骤出错都降级为 failed，错误信息写入结果日志。每次申请恰好写一条记录。

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::config::ApplicationConfig;
use crate::error::DelayError;
use crate::infrastructure::{BrowserSession, PageElement};
use crate::models::{ApplyStatus, Job, LogRecord};
use crate::services::delay::{settle, DelayRange};
use crate::services::element_locator::locate_first;
use crate::services::{PortalSelectors, ResultSink};
use crate::utils::truncate_text;
use crate::workflow::apply_ctx::ApplyCtx;

/// 申请流程的中间状态（仅用于日志）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Navigated,
    AffordanceSearched,
    FormOpened,
    Uploaded,
    NoUpload,
    Submitted,
    NoSubmitButton,
}

/// 职位申请流程
///
/// - 编排单个职位的申请步骤
/// - 决定每一步失败时落到哪个终态
/// - 不持有浏览器会话
pub struct ApplyFlow {
    config: ApplicationConfig,
    action_delay: DelayRange,
    batch_delay: DelayRange,
    sink: Arc<dyn ResultSink>,
}

impl ApplyFlow {
    /// 创建新的申请流程
    pub fn new(config: ApplicationConfig, sink: Arc<dyn ResultSink>) -> Result<Self, DelayError> {
        let action_delay = config.action_delay()?;
        let batch_delay = config.batch_delay()?;
        Ok(Self {
            config,
            action_delay,
            batch_delay,
            sink,
        })
    }

    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// 职位之间的等待区间
    pub fn batch_delay(&self) -> DelayRange {
        self.batch_delay
    }

    /// 申请单个职位
    ///
    /// 总是返回一个终态，且返回前恰好写入一条结果记录
    pub async fn attempt<S>(&self, session: &S, job: &Job, ctx: &ApplyCtx) -> ApplyStatus
    where
        S: BrowserSession,
    {
        info!("{} 📝 开始申请: {}", ctx, truncate_text(&job.label(), 80));

        let (status, error) = match self.drive(session, job, ctx).await {
            Ok(status) => (status, None),
            Err(e) => {
                let message = format!("{:#}", e);
                error!("{} ❌ 申请过程出错: {}", ctx, message);
                (ApplyStatus::Failed, Some(message))
            }
        };

        self.write_record(ctx, job, status, error).await;
        log_outcome(ctx, status);
        status
    }

    /// 写入结果记录；写入失败只记录日志，不改变申请结果
    pub async fn write_record(
        &self,
        ctx: &ApplyCtx,
        job: &Job,
        status: ApplyStatus,
        error: Option<String>,
    ) {
        let record = LogRecord::new(job, status, error);
        if let Err(e) = self.sink.append(&record).await {
            error!("{} ⚠️ 结果日志写入失败: {}", ctx, e);
        }
    }

    async fn drive<S>(&self, session: &S, job: &Job, ctx: &ApplyCtx) -> Result<ApplyStatus>
    where
        S: BrowserSession,
    {
        let selectors = PortalSelectors::for_portal(job.portal);

        // ========== 1. 打开职位页面 ==========
        if !job.has_link() {
            anyhow::bail!("职位链接不可用");
        }
        session
            .navigate(&job.link)
            .await
            .with_context(|| format!("打开职位页面失败: {}", job.link))?;
        self.action_delay.pause().await;
        trace_stage(ctx, Stage::Navigated);

        // ========== 2. 查找申请按钮 ==========
        let apply_button = locate_first(session, &selectors.apply_button).await;
        trace_stage(ctx, Stage::AffordanceSearched);

        let Some(apply_button) = apply_button else {
            warn!("{} ⚠️ 未找到申请按钮，需要人工申请", ctx);
            return Ok(ApplyStatus::ManualRequired);
        };

        apply_button
            .click()
            .await
            .context("点击申请按钮失败")?;
        self.action_delay.pause().await;
        trace_stage(ctx, Stage::FormOpened);

        // ========== 3. 上传简历（可选） ==========
        settle(self.config.form_settle_sec).await;
        let uploaded = self.upload_resume(session, ctx, &selectors).await?;
        trace_stage(ctx, if uploaded { Stage::Uploaded } else { Stage::NoUpload });

        // ========== 4. 提交 ==========
        let Some(submit_button) = locate_first(session, &selectors.submit_button).await else {
            warn!("{} ⚠️ 表单已打开但未找到提交按钮", ctx);
            trace_stage(ctx, Stage::NoSubmitButton);
            return Ok(ApplyStatus::Partial);
        };

        submit_button
            .click()
            .await
            .context("点击提交按钮失败")?;
        settle(self.config.submit_settle_sec).await;
        trace_stage(ctx, Stage::Submitted);

        Ok(ApplyStatus::Success)
    }

    /// 找到上传框且简历文件存在时上传，返回是否上传
    async fn upload_resume<S>(
        &self,
        session: &S,
        ctx: &ApplyCtx,
        selectors: &PortalSelectors,
    ) -> Result<bool>
    where
        S: BrowserSession,
    {
        let Some(input) = locate_first(session, &selectors.upload_input).await else {
            debug!("{} 表单中没有文件上传框", ctx);
            return Ok(false);
        };

        let Some(resume_path) = self.config.resume_path.as_deref() else {
            debug!("{} 未配置简历路径，跳过上传", ctx);
            return Ok(false);
        };

        if !resume_path.is_file() {
            warn!(
                "{} ⚠️ 简历文件不存在或不是文件，跳过上传: {}",
                ctx,
                resume_path.display()
            );
            return Ok(false);
        }

        let absolute = absolute_path(resume_path)?;
        info!("{} 📎 上传简历: {}", ctx, absolute.display());
        input
            .send_input(&absolute.to_string_lossy())
            .await
            .context("上传简历失败")?;
        self.action_delay.pause().await;
        Ok(true)
    }
}

fn absolute_path(path: &Path) -> Result<std::path::PathBuf> {
    std::fs::canonicalize(path)
        .with_context(|| format!("无法解析简历路径: {}", path.display()))
}

fn trace_stage(ctx: &ApplyCtx, stage: Stage) {
    debug!("{} → {:?}", ctx, stage);
}

fn log_outcome(ctx: &ApplyCtx, status: ApplyStatus) {
    match status {
        ApplyStatus::Success => info!("{} ✅ 申请已提交", ctx),
        ApplyStatus::Partial => info!("{} 🟡 表单未能自动完成 (partial)", ctx),
        ApplyStatus::ManualRequired => info!("{} 👤 需要人工申请 (manual_required)", ctx),
        ApplyStatus::Failed => info!("{} ❌ 申请失败 (failed)", ctx),
    }
}
