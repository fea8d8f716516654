//! 职位搜索服务 - 业务能力层
//!
//! 只负责"搜索职位"能力，不关心申请流程

use std::collections::HashSet;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{ApplicationConfig, Filters};
use crate::infrastructure::{BrowserSession, QueryScope};
use crate::models::{Job, Portal, LINK_UNAVAILABLE};
use crate::services::element_locator::{locate, locate_attribute, locate_text};
use crate::services::selectors::PortalSelectors;

/// 单次搜索最多解析的卡片数
pub const MAX_CARDS_PER_SEARCH: usize = 25;

/// 职位搜索服务
///
/// 职责：
/// - 按 `job_portal` 分派到对应网站
/// - 每次调用都重新抓取，不缓存
/// - 不认识申请流程
pub struct JobSearch {
    max_cards: usize,
}

impl JobSearch {
    /// 创建新的搜索服务
    pub fn new() -> Self {
        Self {
            max_cards: MAX_CARDS_PER_SEARCH,
        }
    }

    /// 自定义单次解析的卡片上限
    pub fn with_max_cards(max_cards: usize) -> Self {
        Self { max_cards }
    }

    /// 搜索职位
    ///
    /// 不支持的网站返回空列表（记录警告）；列表页导航失败返回错误
    pub async fn search<S>(&self, session: &S, config: &ApplicationConfig) -> Result<Vec<Job>>
    where
        S: BrowserSession,
    {
        let Some(portal) = Portal::parse(&config.job_portal) else {
            warn!("⚠️ 暂不支持的招聘网站: {}，返回空列表", config.job_portal);
            return Ok(Vec::new());
        };

        let url = search_url(portal, &config.filters)?;
        info!("🔍 正在 {} 搜索职位: {}", portal, url);

        session
            .navigate(url.as_str())
            .await
            .with_context(|| format!("无法打开职位列表页: {}", url))?;
        config.action_delay()?.pause().await;

        let jobs = self.collect_jobs(session, portal).await;
        if jobs.is_empty() {
            warn!("⚠️ {} 页面上没有解析到职位卡片", portal);
        } else {
            info!("✓ 在 {} 找到 {} 个职位", portal, jobs.len());
        }
        Ok(jobs)
    }

    /// 从当前页面解析职位卡片，保持页面顺序
    async fn collect_jobs<S>(&self, session: &S, portal: Portal) -> Vec<Job>
    where
        S: QueryScope,
    {
        let selectors = PortalSelectors::for_portal(portal);
        let Some(cards) = locate(session, &selectors.job_cards, false).await else {
            return Vec::new();
        };
        debug!("找到 {} 个职位卡片，解析前 {} 个", cards.len(), self.max_cards);

        let mut seen_links = HashSet::new();
        let mut jobs = Vec::new();

        for (index, card) in cards.iter().take(self.max_cards).enumerate() {
            let title = locate_text(card, &selectors.card_title).await;
            let company = locate_text(card, &selectors.card_company).await;

            if title.is_none() && company.is_none() {
                debug!("卡片 {} 缺少标题和公司，跳过", index + 1);
                continue;
            }

            let link = locate_attribute(card, &selectors.card_link, "href")
                .await
                .and_then(|href| resolve_link(portal, &href))
                .unwrap_or_else(|| LINK_UNAVAILABLE.to_string());

            if link != LINK_UNAVAILABLE && !seen_links.insert(link.clone()) {
                debug!("卡片 {} 与之前的职位链接重复，跳过", index + 1);
                continue;
            }

            jobs.push(Job::new(title, company, link, portal));
        }

        jobs
    }
}

impl Default for JobSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// 根据筛选条件生成列表页地址
pub fn search_url(portal: Portal, filters: &Filters) -> Result<Url> {
    let keywords = filters
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let location = filters.location.trim();

    let url = match portal {
        Portal::LinkedIn => {
            let mut params = vec![("keywords", keywords.as_str()), ("location", location)];
            if let Some(code) = linkedin_experience_code(&filters.experience_level) {
                params.push(("f_E", code));
            }
            Url::parse_with_params("https://www.linkedin.com/jobs/search/", &params)?
        }
        Portal::Indeed => {
            let mut params = vec![("q", keywords.as_str()), ("l", location)];
            if let Some(level) = indeed_experience_level(&filters.experience_level) {
                params.push(("explvl", level));
            }
            Url::parse_with_params("https://www.indeed.com/jobs", &params)?
        }
    };
    Ok(url)
}

fn linkedin_experience_code(level: &str) -> Option<&'static str> {
    match normalize_level(level).as_str() {
        "internship" => Some("1"),
        "entry" | "entry-level" | "junior" => Some("2"),
        "associate" => Some("3"),
        "mid" | "mid-senior" | "senior" => Some("4"),
        "director" => Some("5"),
        "executive" => Some("6"),
        _ => None,
    }
}

fn indeed_experience_level(level: &str) -> Option<&'static str> {
    match normalize_level(level).as_str() {
        "internship" | "entry" | "entry-level" | "junior" => Some("ENTRY_LEVEL"),
        "associate" | "mid" | "mid-senior" => Some("MID_LEVEL"),
        "senior" | "director" | "executive" => Some("SENIOR_LEVEL"),
        _ => None,
    }
}

fn normalize_level(level: &str) -> String {
    level.trim().to_lowercase().replace([' ', '_'], "-")
}

/// 把相对链接补全为绝对地址，并去掉跟踪参数片段
fn resolve_link(portal: Portal, href: &str) -> Option<String> {
    let base = Url::parse(portal.origin()).ok()?;
    let mut url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}
