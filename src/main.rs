// ==========================================
// 灌溉排程系统 - 主入口
// ==========================================
// 启动顺序: 解析参数 → 日志 → 打开数据库 → 建表 → 默认地块 → 交互菜单
// ==========================================

use anyhow::Context;
use clap::Parser;
use irrigation_scheduler::app::{AppState, RustylinePrompter, Shell};
use irrigation_scheduler::config::{AppConfig, CliArgs};
use irrigation_scheduler::logging;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_args(CliArgs::parse());

    // 初始化日志系统
    logging::init(config.log_filter.as_deref());

    tracing::info!(
        "{} v{}",
        irrigation_scheduler::APP_NAME,
        irrigation_scheduler::VERSION
    );

    let db_path = config.db_path_str();
    let state = AppState::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path))?;

    let seeded = state
        .initialize_store()
        .context("failed to initialize database schema")?;
    if seeded > 0 {
        tracing::info!(seeded, "首次启动,已写入默认地块");
    }

    let prompter = RustylinePrompter::new().context("failed to initialize terminal input")?;
    let stdout = std::io::stdout();
    let mut shell = Shell::new(&state, prompter, stdout.lock()).with_forecast_days(config.forecast_days);
    shell.run().context("terminal output failed")?;

    Ok(())
}
