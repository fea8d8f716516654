//! 浏览器会话能力接口 - 基础设施层
//!
//! 核心流程只依赖这里的 trait，不直接接触 chromiumoxide。

use anyhow::Result;
use async_trait::async_trait;

use crate::models::LocatorSpec;

/// 可以在其中查询元素的上下文（整个页面或某个元素内部）
#[async_trait]
pub trait QueryScope: Send + Sync {
    type Element: PageElement;

    /// 按单一定位方式查询；不支持该方式时返回错误
    async fn query(&self, locator: &LocatorSpec) -> Result<Vec<Self::Element>>;
}

/// 页面元素
#[async_trait]
pub trait PageElement: QueryScope<Element = Self> + Sized {
    async fn click(&self) -> Result<()>;

    /// 输入文本；对文件输入框则是设置要上传的文件路径
    async fn send_input(&self, text: &str) -> Result<()>;

    async fn text(&self) -> Result<Option<String>>;

    async fn attribute(&self, name: &str) -> Result<Option<String>>;
}

/// 浏览器会话
///
/// 整个运行期间独占，结束时由编排层关闭一次。
#[async_trait]
pub trait BrowserSession: QueryScope {
    async fn navigate(&self, url: &str) -> Result<()>;

    /// 等待操作员确认（例如手动登录完成）
    async fn await_operator_ready(&self, prompt: &str) -> Result<()>;

    async fn close(&self) -> Result<()>;
}
