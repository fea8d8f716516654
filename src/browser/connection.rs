use anyhow::Result;
use chromiumoxide::Browser;
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::BrowserError;
use crate::infrastructure::{ChromeSession, SessionOrigin};

/// 连接到已开启远程调试端口的浏览器，并打开一个新页面
///
/// 浏览器需以 `--remote-debugging-port=<port>` 启动
pub async fn connect_to_browser(port: u16, start_url: &str) -> Result<ChromeSession> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        BrowserError::connection_failed(port, e)
    })?;
    debug!("浏览器连接成功");

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

    debug!("创建新页面并导航到: {}", start_url);
    let page = browser.new_page(start_url).await.map_err(|e| {
        error!("创建新页面失败: {}", e);
        BrowserError::navigation_failed(start_url, e)
    })?;
    info!("已导航到: {}", start_url);

    Ok(ChromeSession::new(
        browser,
        page,
        handler_task,
        SessionOrigin::Connected,
    ))
}
