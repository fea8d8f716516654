//! 命令行参数
//!
//! 运行参数来自环境变量（见 [`Config::from_env`](crate::config::Config::from_env)），
//! 这里只区分子命令。

use clap::{Parser, Subcommand};

/// 在招聘网站上自动搜索并申请职位
#[derive(Debug, Parser)]
#[command(name = "job_auto_apply", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 输出 debug 日志（等同于 VERBOSE_LOGGING=true）
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// 搜索职位并依次申请（默认）
    Run,
    /// 检查配置文件和简历，不打开浏览器
    Validate,
}

impl Cli {
    /// 未指定子命令时执行 run
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_run() {
        let cli = Cli::parse_from(["job_auto_apply"]);
        assert_eq!(cli.command(), Command::Run);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_validate_with_verbose() {
        let cli = Cli::parse_from(["job_auto_apply", "validate", "-v"]);
        assert_eq!(cli.command(), Command::Validate);
        assert!(cli.verbose);
    }
}
