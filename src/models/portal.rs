/// 招聘网站枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portal {
    /// LinkedIn
    LinkedIn,
    /// Indeed
    Indeed,
}

impl Portal {
    /// 配置文件中使用的标识
    pub fn name(self) -> &'static str {
        match self {
            Portal::LinkedIn => "linkedin",
            Portal::Indeed => "indeed",
        }
    }

    /// 站点根地址，用于补全相对链接
    pub fn origin(self) -> &'static str {
        match self {
            Portal::LinkedIn => "https://www.linkedin.com",
            Portal::Indeed => "https://www.indeed.com",
        }
    }

    /// 从配置字符串解析（忽略大小写与首尾空白）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" => Some(Portal::LinkedIn),
            "indeed" => Some(Portal::Indeed),
            _ => None,
        }
    }
}

impl std::fmt::Display for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
