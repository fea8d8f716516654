//! 各招聘网站的定位方式列表
//!
//! 每个列表从最精确到最通用排列。页面改版时只需要调整这里。

use crate::models::{LocatorSpec, Portal};

/// 一个招聘网站所需的全部定位方式
#[derive(Debug, Clone)]
pub struct PortalSelectors {
    /// 职位列表中的卡片
    pub job_cards: Vec<LocatorSpec>,
    /// 卡片内的标题
    pub card_title: Vec<LocatorSpec>,
    /// 卡片内的公司名
    pub card_company: Vec<LocatorSpec>,
    /// 卡片内的职位链接（读取 href）
    pub card_link: Vec<LocatorSpec>,
    /// 职位详情页上的申请按钮
    pub apply_button: Vec<LocatorSpec>,
    /// 申请表单中的文件上传框
    pub upload_input: Vec<LocatorSpec>,
    /// 申请表单中的提交按钮
    pub submit_button: Vec<LocatorSpec>,
}

impl PortalSelectors {
    pub fn for_portal(portal: Portal) -> Self {
        match portal {
            Portal::LinkedIn => Self::linkedin(),
            Portal::Indeed => Self::indeed(),
        }
    }

    fn linkedin() -> Self {
        Self {
            job_cards: vec![
                LocatorSpec::css("li.jobs-search-results__list-item"),
                LocatorSpec::css("div.job-card-container"),
                LocatorSpec::css("ul.jobs-search__results-list > li"),
                LocatorSpec::css("div.base-card"),
            ],
            card_title: vec![
                LocatorSpec::css("a.job-card-list__title"),
                LocatorSpec::css(".job-card-list__title--link"),
                LocatorSpec::css("h3.base-search-card__title"),
                LocatorSpec::css("h3"),
            ],
            card_company: vec![
                LocatorSpec::css(".job-card-container__primary-description"),
                LocatorSpec::css(".artdeco-entity-lockup__subtitle"),
                LocatorSpec::css("h4.base-search-card__subtitle"),
                LocatorSpec::css("h4"),
            ],
            card_link: vec![
                LocatorSpec::css("a.job-card-list__title"),
                LocatorSpec::css("a.base-card__full-link"),
                LocatorSpec::css("a[href*='/jobs/view/']"),
                LocatorSpec::css("a[href]"),
            ],
            apply_button: common_apply_buttons(&["Easy Apply", "Apply"], "button.jobs-apply-button"),
            upload_input: common_upload_inputs(),
            submit_button: common_submit_buttons("button[aria-label='Submit application']"),
        }
    }

    fn indeed() -> Self {
        Self {
            job_cards: vec![
                LocatorSpec::css("div.job_seen_beacon"),
                LocatorSpec::css("div.cardOutline"),
                LocatorSpec::css("td.resultContent"),
            ],
            card_title: vec![
                LocatorSpec::css("h2.jobTitle span[title]"),
                LocatorSpec::css("h2.jobTitle"),
                LocatorSpec::css("h2"),
            ],
            card_company: vec![
                LocatorSpec::css("[data-testid='company-name']"),
                LocatorSpec::css("span.companyName"),
                LocatorSpec::css(".company_location span"),
            ],
            card_link: vec![
                LocatorSpec::css("h2.jobTitle a"),
                LocatorSpec::css("a.jcs-JobTitle"),
                LocatorSpec::css("a[href*='/viewjob']"),
                LocatorSpec::css("a[href]"),
            ],
            apply_button: common_apply_buttons(
                &["Apply now", "Easily apply", "Apply"],
                "#indeedApplyButton",
            ),
            upload_input: common_upload_inputs(),
            submit_button: common_submit_buttons("button.ia-continueButton"),
        }
    }
}

/// 先用站点专属选择器，再按按钮文字匹配
fn common_apply_buttons(labels: &[&str], specific: &str) -> Vec<LocatorSpec> {
    let mut strategies = vec![LocatorSpec::css(specific)];
    strategies.extend(labels.iter().map(|label| LocatorSpec::text("button", *label)));
    strategies.push(LocatorSpec::xpath(
        "//button[contains(translate(@aria-label, 'APLY', 'aply'), 'apply')]",
    ));
    strategies
}

fn common_upload_inputs() -> Vec<LocatorSpec> {
    vec![
        LocatorSpec::css("input[type='file'][name*='resume' i]"),
        LocatorSpec::css("input[type='file'][id*='resume' i]"),
        LocatorSpec::css("input[type='file']"),
    ]
}

fn common_submit_buttons(specific: &str) -> Vec<LocatorSpec> {
    vec![
        LocatorSpec::css(specific),
        LocatorSpec::text("button", "Submit application"),
        LocatorSpec::text("button", "Submit"),
        LocatorSpec::css("button[type='submit']"),
        LocatorSpec::css("input[type='submit']"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_portal_has_all_lists() {
        for portal in [Portal::LinkedIn, Portal::Indeed] {
            let s = PortalSelectors::for_portal(portal);
            for list in [
                &s.job_cards,
                &s.card_title,
                &s.card_company,
                &s.card_link,
                &s.apply_button,
                &s.upload_input,
                &s.submit_button,
            ] {
                assert!(!list.is_empty(), "{portal} has an empty selector list");
            }
        }
    }

    #[test]
    fn linkedin_prefers_easy_apply_text_over_generic_apply() {
        let s = PortalSelectors::for_portal(Portal::LinkedIn);
        let easy = s
            .apply_button
            .iter()
            .position(|l| *l == LocatorSpec::text("button", "Easy Apply"))
            .unwrap();
        let generic = s
            .apply_button
            .iter()
            .position(|l| *l == LocatorSpec::text("button", "Apply"))
            .unwrap();
        assert!(easy < generic);
    }
}
