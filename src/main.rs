use anyhow::Result;
use clap::Parser;
use job_auto_apply::cli::{Cli, Command};
use job_auto_apply::config::Config;
use job_auto_apply::orchestrator::setup_check;
use job_auto_apply::utils::logging;
use job_auto_apply::App;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载运行配置
    let mut config = Config::from_env();
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    match cli.command() {
        Command::Validate => {
            let results = setup_check::run_checks(&config);
            if !setup_check::report(&results) {
                anyhow::bail!("环境检查未通过");
            }
        }
        Command::Run => {
            // 配置加载失败时直接退出，不打开浏览器
            let app = App::initialize(config)?;
            app.run().await?;
        }
    }

    Ok(())
}
