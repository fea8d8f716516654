//! 运行前环境检查
//!
//! 在第一次运行前确认配置文件和简历都已就绪，不打开浏览器

use std::path::Path;

use tracing::{error, info, warn};

use crate::config::{ApplicationConfig, Config};
use crate::models::Portal;

/// 单项检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            detail: detail.into(),
        }
    }
}

/// 执行全部检查
pub fn run_checks(config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let app_config = match ApplicationConfig::load(&config.config_path) {
        Ok(app_config) => {
            results.push(CheckResult::pass(
                "配置文件",
                format!("{} 有效", config.config_path.display()),
            ));
            app_config
        }
        Err(e) => {
            results.push(CheckResult::fail("配置文件", e.to_string()));
            return results;
        }
    };

    results.push(check_portal(&app_config.job_portal));
    results.push(check_resume(app_config.resume_path.as_deref()));
    results.push(check_log_dir(&app_config.log_file));
    results
}

/// 输出检查结果，返回是否全部通过
pub fn report(results: &[CheckResult]) -> bool {
    info!("{}", "=".repeat(60));
    info!("职位自动申请 - 环境检查");
    info!("{}", "=".repeat(60));

    for (i, result) in results.iter().enumerate() {
        if result.passed {
            info!("{}. ✓ {}: {}", i + 1, result.name, result.detail);
        } else {
            error!("{}. ✗ {}: {}", i + 1, result.name, result.detail);
        }
    }

    let passed = results.iter().filter(|r| r.passed).count();
    info!("{}", "=".repeat(60));
    info!("检查结果: {}/{} 项通过", passed, results.len());
    info!("{}", "=".repeat(60));

    if passed == results.len() {
        info!("✓ 全部通过，可以运行");
        true
    } else {
        warn!("✗ {} 项检查未通过，请先修正", results.len() - passed);
        false
    }
}

fn check_portal(job_portal: &str) -> CheckResult {
    match Portal::parse(job_portal) {
        Some(portal) => CheckResult::pass("招聘网站", format!("{} 已支持", portal)),
        None => CheckResult::fail(
            "招聘网站",
            format!("{} 暂不支持，搜索将返回空列表", job_portal),
        ),
    }
}

fn check_resume(resume_path: Option<&Path>) -> CheckResult {
    match resume_path {
        None => CheckResult::pass("简历文件", "未配置，申请时跳过上传"),
        Some(path) if path.is_file() => {
            CheckResult::pass("简历文件", format!("已找到 {}", path.display()))
        }
        Some(path) => CheckResult::fail("简历文件", format!("未找到 {}", path.display())),
    }
}

fn check_log_dir(log_file: &Path) -> CheckResult {
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if dir.is_dir() {
        CheckResult::pass("结果日志", format!("写入 {}", log_file.display()))
    } else {
        CheckResult::fail("结果日志", format!("目录不存在: {}", dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_in(dir: &Path, json: &str) -> Config {
        let path = dir.join("config.json");
        std::fs::write(&path, json).unwrap();
        Config {
            config_path: path,
            ..Config::default()
        }
    }

    #[test]
    fn missing_config_stops_after_first_check() {
        let config = Config {
            config_path: PathBuf::from("nope/config.json"),
            ..Config::default()
        };
        let results = run_checks(&config);
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert!(!report(&results));
    }

    #[test]
    fn valid_setup_passes_every_check() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("resume.pdf");
        std::fs::write(&resume, b"%PDF").unwrap();
        let json = format!(
            r#"{{
                "delay_range_sec": [1, 2],
                "resume_path": {:?},
                "job_portal": "linkedin",
                "filters": {{"keywords": ["rust"], "location": "", "experience_level": ""}},
                "log_file": {:?}
            }}"#,
            resume.to_string_lossy(),
            dir.path().join("log.csv").to_string_lossy()
        );
        let results = run_checks(&config_in(dir.path(), &json));
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
        assert!(report(&results));
    }

    #[test]
    fn missing_resume_and_unknown_portal_fail() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{
            "delay_range_sec": [1, 2],
            "resume_path": "does/not/exist.pdf",
            "job_portal": "monster",
            "filters": {"keywords": [], "location": "", "experience_level": ""}
        }"#;
        let results = run_checks(&config_in(dir.path(), json));
        let failed: Vec<_> = results.iter().filter(|r| !r.passed).map(|r| r.name).collect();
        assert_eq!(failed, vec!["招聘网站", "简历文件"]);
    }
}
