use chrono::{DateTime, Local, SecondsFormat};

use crate::models::job::Job;
use crate::models::status::ApplyStatus;

/// 结果日志的列顺序
pub const LOG_FIELDS: [&str; 6] = ["time", "title", "company", "link", "status", "error"];

/// 单次申请的结果记录（只追加，不修改）
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub time: DateTime<Local>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub link: String,
    pub status: ApplyStatus,
    pub error: Option<String>,
}

impl LogRecord {
    /// 以当前时间创建记录
    pub fn new(job: &Job, status: ApplyStatus, error: Option<String>) -> Self {
        Self {
            time: Local::now(),
            title: job.title.clone(),
            company: job.company.clone(),
            link: job.link.clone(),
            status,
            error,
        }
    }

    /// 按 `LOG_FIELDS` 顺序输出各列
    pub fn fields(&self) -> [String; 6] {
        [
            self.time.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.title.clone().unwrap_or_default(),
            self.company.clone().unwrap_or_default(),
            self.link.clone(),
            self.status.as_str().to_string(),
            self.error.clone().unwrap_or_default(),
        ]
    }
}
