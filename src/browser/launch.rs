use std::path::Path;

use anyhow::Result;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::BrowserError;
use crate::infrastructure::{ChromeSession, SessionOrigin};

/// 启动有界面的浏览器并导航到指定 URL
///
/// 需要人工登录，所以不使用无头模式
pub async fn launch_browser(executable: Option<&Path>, url: &str) -> Result<ChromeSession> {
    info!("🚀 启动浏览器...");
    debug!("目标 URL: {}", url);

    let mut builder = BrowserConfig::builder().with_head().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-blink-features=AutomationControlled",
    ]);
    if let Some(path) = executable {
        debug!("使用自定义浏览器: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    let config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        BrowserError::LaunchFailed(e)
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        BrowserError::LaunchFailed(e.to_string())
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page(url).await.map_err(|e| {
        error!("创建页面失败: {}", e);
        BrowserError::navigation_failed(url, e)
    })?;

    info!("✅ 浏览器已导航到: {}", url);

    Ok(ChromeSession::new(
        browser,
        page,
        handler_task,
        SessionOrigin::Launched,
    ))
}
