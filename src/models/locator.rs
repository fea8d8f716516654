/// 元素定位方式
///
/// 同一个目标通常配置多条，按顺序尝试，越靠前越精确。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocatorSpec {
    /// CSS 选择器（属性匹配）
    Css(String),
    /// XPath（结构路径匹配）
    XPath(String),
    /// 按标签和可见文本匹配
    Text { tag: String, text: String },
}

impl LocatorSpec {
    pub fn css(selector: impl Into<String>) -> Self {
        LocatorSpec::Css(selector.into())
    }

    pub fn xpath(path: impl Into<String>) -> Self {
        LocatorSpec::XPath(path.into())
    }

    pub fn text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        LocatorSpec::Text {
            tag: tag.into(),
            text: text.into(),
        }
    }

    /// 文本匹配转换成等价的 XPath；其它方式返回 None
    pub fn text_as_xpath(&self) -> Option<String> {
        match self {
            LocatorSpec::Text { tag, text } => Some(format!(
                "//{}[contains(normalize-space(.), {})]",
                tag,
                xpath_literal(text)
            )),
            _ => None,
        }
    }
}

impl std::fmt::Display for LocatorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocatorSpec::Css(s) => write!(f, "css({})", s),
            LocatorSpec::XPath(p) => write!(f, "xpath({})", p),
            LocatorSpec::Text { tag, text } => write!(f, "text({} ~ {:?})", tag, text),
        }
    }
}

/// XPath 字符串字面量（处理引号）
fn xpath_literal(s: &str) -> String {
    if !s.contains('"') {
        format!("\"{}\"", s)
    } else if !s.contains('\'') {
        format!("'{}'", s)
    } else {
        let parts: Vec<String> = s.split('"').map(|p| format!("\"{}\"", p)).collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}
