//! 多策略元素定位 - 业务能力层
//!
//! 目标网站的页面结构经常变化，每个目标都配置一组按优先级排列的定位方式，
//! 依次尝试，第一条命中的结果即为答案。找不到元素是正常的业务结果，不是错误。

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::infrastructure::{PageElement, QueryScope};
use crate::models::LocatorSpec;

/// 依次尝试定位方式
///
/// - 第一条返回至少一个元素的方式胜出，后面的方式不再执行
/// - `first_only` 为 true 时只保留第一个元素
/// - 单条方式查询出错（包括不支持该方式）按未命中处理
/// - 全部未命中返回 None
pub async fn locate<S>(
    scope: &S,
    strategies: &[LocatorSpec],
    first_only: bool,
) -> Option<Vec<S::Element>>
where
    S: QueryScope + ?Sized,
{
    for strategy in strategies {
        match scope.query(strategy).await {
            Ok(mut found) if !found.is_empty() => {
                debug!("定位命中 {} ({} 个)", strategy, found.len());
                if first_only {
                    found.truncate(1);
                }
                return Some(found);
            }
            Ok(_) => {
                debug!("定位未命中 {}", strategy);
            }
            Err(e) => {
                debug!("定位方式 {} 查询出错，按未命中处理: {}", strategy, e);
            }
        }
    }
    None
}

/// 返回第一个命中的元素
pub async fn locate_first<S>(scope: &S, strategies: &[LocatorSpec]) -> Option<S::Element>
where
    S: QueryScope + ?Sized,
{
    locate(scope, strategies, true)
        .await
        .and_then(|found| found.into_iter().next())
}

/// 返回第一个命中元素的文本（去掉首尾空白，空文本视为未命中）
pub async fn locate_text<S>(scope: &S, strategies: &[LocatorSpec]) -> Option<String>
where
    S: QueryScope + ?Sized,
{
    let element = locate_first(scope, strategies).await?;
    match element.text().await {
        Ok(Some(text)) => {
            let text = normalize_whitespace(&text);
            (!text.is_empty()).then_some(text)
        }
        Ok(None) => None,
        Err(e) => {
            debug!("读取元素文本失败: {}", e);
            None
        }
    }
}

/// 返回第一个命中元素的属性值
pub async fn locate_attribute<S>(
    scope: &S,
    strategies: &[LocatorSpec],
    name: &str,
) -> Option<String>
where
    S: QueryScope + ?Sized,
{
    let element = locate_first(scope, strategies).await?;
    match element.attribute(name).await {
        Ok(Some(value)) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => None,
        Err(e) => {
            debug!("读取元素属性 {} 失败: {}", name, e);
            None
        }
    }
}

/// 合并连续空白为单个空格
fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"));
    re.replace_all(text.trim(), " ").into_owned()
}
