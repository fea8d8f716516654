use serde::{Deserialize, Serialize};

use crate::models::portal::Portal;

/// 链接提取失败时使用的占位值
pub const LINK_UNAVAILABLE: &str = "unavailable";

/// 职位
///
/// 由职位搜索产生，之后只读。标题和公司至少有一个。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: Option<String>,
    pub company: Option<String>,
    pub link: String,
    pub portal: Portal,
}

impl Job {
    pub fn new(
        title: Option<String>,
        company: Option<String>,
        link: impl Into<String>,
        portal: Portal,
    ) -> Self {
        Self {
            title,
            company,
            link: link.into(),
            portal,
        }
    }

    /// 链接是否可用（不是占位值）
    pub fn has_link(&self) -> bool {
        self.link != LINK_UNAVAILABLE && !self.link.trim().is_empty()
    }

    /// 用于日志显示的 "标题 @ 公司"
    pub fn label(&self) -> String {
        format!(
            "{} @ {}",
            self.title.as_deref().unwrap_or("(无标题)"),
            self.company.as_deref().unwrap_or("(无公司)")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_link_is_detected() {
        let job = Job::new(Some("Dev".into()), None, LINK_UNAVAILABLE, Portal::LinkedIn);
        assert!(!job.has_link());
        assert_eq!(job.label(), "Dev @ (无公司)");
    }
}
