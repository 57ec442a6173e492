// ==========================================
// 灌溉排程系统 - 运行配置
// ==========================================
// 优先级: --db-path > IRRIGATION_DB_PATH > 用户数据目录 > ./irrigation.db
// ==========================================

use clap::Parser;
use std::path::PathBuf;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "IRRIGATION_DB_PATH";

/// 默认预报天数 (明天起连续 3 天)
pub const DEFAULT_FORECAST_DAYS: u32 = 3;

/// 默认数据库文件名
const DB_FILE_NAME: &str = "irrigation.db";

/// 命令行参数
#[derive(Debug, Clone, Parser)]
#[command(name = "irrigation-scheduler", version, about = "Irrigation scheduling: fields, ET0 and ETc")]
pub struct CliArgs {
    /// SQLite 数据库文件路径
    #[arg(long, env = DB_PATH_ENV)]
    pub db_path: Option<PathBuf>,

    /// 录入 ET0 / 计算 ETc 的天数 (从明天开始)
    #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS, value_parser = clap::value_parser!(u32).range(1..=31))]
    pub forecast_days: u32,

    /// 日志过滤器 (覆盖 RUST_LOG),例如 debug 或 irrigation_scheduler=trace
    #[arg(long)]
    pub log_level: Option<String>,
}

/// 运行配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub forecast_days: u32,
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// 由命令行参数解析运行配置
    pub fn from_args(args: CliArgs) -> Self {
        let db_path = args
            .db_path
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(get_default_db_path);

        Self {
            db_path,
            forecast_days: args.forecast_days,
            log_filter: args.log_level.filter(|s| !s.trim().is_empty()),
        }
    }

    /// 数据库路径字符串
    pub fn db_path_str(&self) -> String {
        self.db_path.to_string_lossy().into_owned()
    }
}

/// 获取默认数据库路径
///
/// 优先使用用户数据目录,无法获取时回退到当前目录
pub fn get_default_db_path() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => {
            let dir = data_dir.join("irrigation-scheduler");
            // 目录创建失败时回退到当前目录
            if std::fs::create_dir_all(&dir).is_ok() {
                dir.join(DB_FILE_NAME)
            } else {
                PathBuf::from(DB_FILE_NAME)
            }
        }
        None => PathBuf::from(DB_FILE_NAME),
    }
}
