use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::services::delay::DelayRange;

/// 程序运行配置（来自环境变量）
#[derive(Clone, Debug)]
pub struct Config {
    /// 申请配置文件路径
    pub config_path: PathBuf,
    /// 浏览器调试端口；设置时连接已有浏览器，否则启动新浏览器
    pub browser_debug_port: Option<u16>,
    /// 自定义浏览器可执行文件
    pub chrome_executable: Option<PathBuf>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            browser_debug_port: None,
            chrome_executable: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            config_path: std::env::var("JOB_CONFIG_PATH").map(PathBuf::from).unwrap_or(default.config_path),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).or(default.browser_debug_port),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().map(PathBuf::from).or(default.chrome_executable),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

/// 职位筛选条件
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// 关键词（按顺序拼接进搜索词）
    pub keywords: Vec<String>,
    /// 地点
    pub location: String,
    /// 经验级别，例如 "entry" / "mid-senior"
    pub experience_level: String,
}

/// 申请配置（config.json）
///
/// 每次运行只加载一次，之后所有组件只读使用。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// 两次浏览器操作之间的随机延迟区间（秒）
    pub delay_range_sec: (f64, f64),
    /// 简历文件路径
    #[serde(default)]
    pub resume_path: Option<PathBuf>,
    /// 本次运行最多申请的职位数
    #[serde(default)]
    pub max_applications: Option<NonZeroUsize>,
    /// 招聘网站，例如 "linkedin"
    pub job_portal: String,
    pub filters: Filters,
    /// 两个职位之间的随机延迟区间（秒）
    #[serde(default = "default_batch_delay")]
    pub batch_delay_range_sec: (f64, f64),
    /// 打开申请表单后等待渲染的固定时间（秒）
    #[serde(default = "default_form_settle")]
    pub form_settle_sec: f64,
    /// 点击提交后等待的固定时间（秒）
    #[serde(default = "default_submit_settle")]
    pub submit_settle_sec: f64,
    /// 结果日志文件
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_batch_delay() -> (f64, f64) {
    (10.0, 20.0)
}

fn default_form_settle() -> f64 {
    2.0
}

fn default_submit_settle() -> f64 {
    5.0
}

fn default_log_file() -> PathBuf {
    PathBuf::from("application_log.csv")
}

impl ApplicationConfig {
    /// 从 JSON 文件加载配置并校验
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        Self::from_json(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// 从 JSON 文本解析配置并校验
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: Box::new(e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验字段之间的约束
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.action_delay().map_err(|e| ConfigError::Invalid {
            field: "delay_range_sec",
            reason: e.to_string(),
        })?;
        self.batch_delay().map_err(|e| ConfigError::Invalid {
            field: "batch_delay_range_sec",
            reason: e.to_string(),
        })?;

        for (field, value) in [
            ("form_settle_sec", self.form_settle_sec),
            ("submit_settle_sec", self.submit_settle_sec),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("必须是非负数, 实际为 {}", value),
                });
            }
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("超出可等待的时长范围: {}", value),
                });
            }
        }

        if self.job_portal.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "job_portal",
                reason: "不能为空".to_string(),
            });
        }

        Ok(())
    }

    /// 操作间延迟区间
    pub fn action_delay(&self) -> Result<DelayRange, crate::error::DelayError> {
        DelayRange::new(self.delay_range_sec.0, self.delay_range_sec.1)
    }

    /// 职位间延迟区间
    pub fn batch_delay(&self) -> Result<DelayRange, crate::error::DelayError> {
        DelayRange::new(self.batch_delay_range_sec.0, self.batch_delay_range_sec.1)
    }

    /// 申请上限
    pub fn max_applications(&self) -> Option<usize> {
        self.max_applications.map(NonZeroUsize::get)
    }
}
