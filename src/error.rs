use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 延迟区间错误
    #[error("延迟错误: {0}")]
    Delay(#[from] DelayError),
    /// 结果日志写入错误
    #[error("日志错误: {0}")]
    Log(#[from] LogError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {0}")]
    LaunchFailed(String),
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 元素操作失败（点击、输入、读取）
    #[error("元素操作 {action} 失败: {source}")]
    ElementActionFailed {
        action: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 当前上下文不支持该定位方式
    #[error("当前上下文不支持定位方式: {0}")]
    UnsupportedLocator(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件不存在
    #[error("配置文件不存在: {}", .path.display())]
    NotFound { path: PathBuf },
    /// 配置文件无法读取或解析
    #[error("配置文件解析失败 ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 字段取值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// 延迟区间错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DelayError {
    /// 区间必须满足 0 ≤ min ≤ max
    #[error("无效的延迟区间 [{min}, {max}]，要求 0 ≤ min ≤ max")]
    InvalidRange { min: f64, max: f64 },
}

/// 结果日志错误
#[derive(Debug, Error)]
pub enum LogError {
    /// 写入日志文件失败
    #[error("写入结果日志失败 ({}): {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl BrowserError {
    /// 创建浏览器连接错误
    pub fn connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        }
    }

    /// 创建导航错误
    pub fn navigation_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        BrowserError::NavigationFailed {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// 创建元素操作错误
    pub fn element_action(
        action: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        BrowserError::ElementActionFailed {
            action,
            source: Box::new(source),
        }
    }
}
