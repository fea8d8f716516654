//! 结果日志服务 - 业务能力层
//!
//! 只负责"追加一条申请记录"能力，不关心流程

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::LogError;
use crate::models::{LogRecord, LOG_FIELDS};

/// 申请结果记录的落地位置
///
/// 只追加；记录顺序与申请顺序一致
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn append(&self, record: &LogRecord) -> Result<(), LogError>;
}

/// CSV 结果日志
///
/// 职责：
/// - 文件不存在或为空时先写表头
/// - 每次申请追加一行：time, title, company, link, status, error
/// - 从不修改或删除已有记录
pub struct CsvResultLog {
    path: PathBuf,
}

impl CsvResultLog {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_row(&self, record: &LogRecord) -> std::io::Result<()> {
        let needs_header = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut buf = String::new();
        if needs_header {
            buf.push_str(&csv_line(LOG_FIELDS.iter().copied()));
        }
        let fields = record.fields();
        buf.push_str(&csv_line(fields.iter().map(String::as_str)));

        file.write_all(buf.as_bytes())?;
        file.flush()
    }
}

#[async_trait]
impl ResultSink for CsvResultLog {
    async fn append(&self, record: &LogRecord) -> Result<(), LogError> {
        debug!(
            "写入结果日志: {} | {} | {}",
            self.path.display(),
            record.status,
            record.link
        );

        self.write_row(record).map_err(|source| LogError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}

/// 生成一行 CSV（以 \r\n 结尾）
fn csv_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = cells.map(escape_cell).collect::<Vec<_>>().join(",");
    line.push_str("\r\n");
    line
}

/// 含逗号、引号或换行的单元格加引号，内部引号加倍
fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplyStatus, Job, Portal};

    fn job(title: &str) -> Job {
        Job::new(
            Some(title.to_string()),
            Some("Acme, Inc.".to_string()),
            "https://example.com/jobs/1",
            Portal::LinkedIn,
        )
    }

    #[test]
    fn escape_quotes_and_commas() {
        assert_eq!(escape_cell("plain"), "plain");
        assert_eq!(escape_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell("two\nlines"), "\"two\nlines\"");
    }

    #[tokio::test]
    async fn header_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvResultLog::with_path(dir.path().join("log.csv"));

        log.append(&LogRecord::new(&job("Dev"), ApplyStatus::Success, None))
            .await
            .unwrap();
        log.append(&LogRecord::new(
            &job("Ops"),
            ApplyStatus::Failed,
            Some("timeout".into()),
        ))
        .await
        .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "time,title,company,link,status,error");
        assert!(lines[1].ends_with(",Dev,\"Acme, Inc.\",https://example.com/jobs/1,success,"));
        assert!(lines[2].ends_with(",Ops,\"Acme, Inc.\",https://example.com/jobs/1,failed,timeout"));
    }

    #[tokio::test]
    async fn appends_to_existing_log_without_new_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(&path, "time,title,company,link,status,error\r\nold,row,,,,\r\n").unwrap();

        let log = CsvResultLog::with_path(&path);
        log.append(&LogRecord::new(&job("Dev"), ApplyStatus::Partial, None))
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("time,title").count(), 1);
        assert!(content.starts_with("time,title,company,link,status,error\r\nold,row"));
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn unwritable_path_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvResultLog::with_path(dir.path().join("missing").join("log.csv"));
        let err = log
            .append(&LogRecord::new(&job("Dev"), ApplyStatus::Success, None))
            .await
            .unwrap_err();
        assert!(matches!(err, LogError::WriteFailed { .. }));
    }
}
