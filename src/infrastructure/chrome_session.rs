//! chromiumoxide 会话实现 - 基础设施层
//!
//! 持有唯一的 Browser / Page 资源，只暴露会话能力

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::element::Element;
use chromiumoxide::{Browser, Page};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::BrowserError;
use crate::infrastructure::session::{BrowserSession, PageElement, QueryScope};
use crate::models::LocatorSpec;

/// 会话来源：决定关闭时是否结束整个浏览器进程
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// 连接到已在运行的浏览器（只关闭自己的页面）
    Connected,
    /// 由本程序启动的浏览器（关闭整个浏览器）
    Launched,
}

/// 基于 chromiumoxide 的浏览器会话
///
/// 职责：
/// - 持有唯一的 Browser 和 Page
/// - 把定位方式翻译成 CDP 查询
/// - 不认识 Job / 申请流程
pub struct ChromeSession {
    page: Page,
    browser: Mutex<Option<Browser>>,
    handler: Mutex<Option<JoinHandle<()>>>,
    origin: SessionOrigin,
}

impl ChromeSession {
    pub fn new(
        browser: Browser,
        page: Page,
        handler: JoinHandle<()>,
        origin: SessionOrigin,
    ) -> Self {
        Self {
            page,
            browser: Mutex::new(Some(browser)),
            handler: Mutex::new(Some(handler)),
            origin,
        }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait]
impl QueryScope for ChromeSession {
    type Element = ChromeElement;

    async fn query(&self, locator: &LocatorSpec) -> Result<Vec<ChromeElement>> {
        let elements = match locator {
            LocatorSpec::Css(selector) => self.page.find_elements(selector.as_str()).await?,
            LocatorSpec::XPath(path) => self.page.find_xpaths(path.as_str()).await?,
            LocatorSpec::Text { .. } => {
                let path = locator
                    .text_as_xpath()
                    .ok_or_else(|| BrowserError::UnsupportedLocator(locator.to_string()))?;
                self.page.find_xpaths(path).await?
            }
        };

        Ok(elements
            .into_iter()
            .map(|element| ChromeElement::new(element, self.page.clone()))
            .collect())
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("导航到: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::navigation_failed(url, e))?;
        Ok(())
    }

    async fn await_operator_ready(&self, prompt: &str) -> Result<()> {
        info!("👤 {}", prompt);
        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let Some(mut browser) = self.browser.lock().await.take() else {
            debug!("会话已关闭，跳过");
            return Ok(());
        };

        let closed: Result<()> = match self.origin {
            SessionOrigin::Launched => match browser.close().await {
                Ok(_) => {
                    if let Err(e) = browser.wait().await {
                        warn!("等待浏览器进程退出失败: {}", e);
                    }
                    Ok(())
                }
                Err(e) => Err(e.into()),
            },
            SessionOrigin::Connected => self.page.clone().close().await.map_err(Into::into),
        };

        let handler = self.handler.lock().await.take();
        finish_close(closed, handler)
    }
}

/// 无论关闭是否成功都停止事件循环任务
fn finish_close(closed: Result<()>, handler: Option<JoinHandle<()>>) -> Result<()> {
    if let Some(handler) = handler {
        handler.abort();
    }

    match closed {
        Ok(()) => {
            info!("🔒 浏览器会话已关闭");
            Ok(())
        }
        Err(e) => {
            warn!("关闭浏览器时出错: {}", e);
            Err(e)
        }
    }
}

/// chromiumoxide 元素
pub struct ChromeElement {
    element: Element,
    page: Page,
}

impl ChromeElement {
    fn new(element: Element, page: Page) -> Self {
        Self { element, page }
    }

    async fn is_file_input(&self) -> Result<bool> {
        let tag_type = self.element.attribute("type").await?;
        Ok(tag_type.is_some_and(|t| t.eq_ignore_ascii_case("file")))
    }
}

#[async_trait]
impl QueryScope for ChromeElement {
    type Element = ChromeElement;

    async fn query(&self, locator: &LocatorSpec) -> Result<Vec<ChromeElement>> {
        // 元素内部只支持 CSS 查询
        let LocatorSpec::Css(selector) = locator else {
            return Err(BrowserError::UnsupportedLocator(locator.to_string()).into());
        };

        let elements = self.element.find_elements(selector.as_str()).await?;
        Ok(elements
            .into_iter()
            .map(|element| ChromeElement::new(element, self.page.clone()))
            .collect())
    }
}

#[async_trait]
impl PageElement for ChromeElement {
    async fn click(&self) -> Result<()> {
        self.element
            .click()
            .await
            .map_err(|e| BrowserError::element_action("click", e))?;
        Ok(())
    }

    async fn send_input(&self, text: &str) -> Result<()> {
        if self.is_file_input().await? {
            let params = SetFileInputFilesParams::builder()
                .file(text)
                .backend_node_id(self.element.backend_node_id.clone())
                .build()
                .map_err(anyhow::Error::msg)?;
            self.page
                .execute(params)
                .await
                .map_err(|e| BrowserError::element_action("upload", e))?;
        } else {
            self.element
                .type_str(text)
                .await
                .map_err(|e| BrowserError::element_action("type", e))?;
        }
        Ok(())
    }

    async fn text(&self) -> Result<Option<String>> {
        let text = self
            .element
            .inner_text()
            .await
            .map_err(|e| BrowserError::element_action("text", e))?;
        Ok(text)
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let value = self
            .element
            .attribute(name)
            .await
            .map_err(|e| BrowserError::element_action("attribute", e))?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    fn idle_handler() -> (JoinHandle<()>, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel::<()>();
        let handler = tokio::spawn(async move {
            let _tx = tx;
            std::future::pending::<()>().await
        });
        (handler, rx)
    }

    #[tokio::test]
    async fn handler_is_aborted_when_close_fails() {
        let (handler, rx) = idle_handler();

        let result = finish_close(Err(anyhow::anyhow!("browser already gone")), Some(handler));

        assert!(result.is_err());
        // 任务被取消后发送端随之释放
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn handler_is_aborted_after_clean_close() {
        let (handler, rx) = idle_handler();

        finish_close(Ok(()), Some(handler)).unwrap();

        assert!(rx.await.is_err());
    }
}
