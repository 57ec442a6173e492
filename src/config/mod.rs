// ==========================================
// 灌溉排程系统 - 配置层
// ==========================================
// 职责: 命令行 / 环境变量 / 默认值 解析为运行配置
// ==========================================

pub mod app_config;

pub use app_config::{get_default_db_path, AppConfig, CliArgs, DB_PATH_ENV, DEFAULT_FORECAST_DAYS};
