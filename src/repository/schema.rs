// ==========================================
// 灌溉排程系统 - 建表与默认数据
// ==========================================
// 职责: 幂等建表/建索引; 空库时写入默认地块
// 说明: 由进程入口显式调用,不在仓储构造时隐式执行
// ==========================================

use crate::repository::error::RepositoryResult;
use rusqlite::{params, Connection};
use tracing::info;

/// 默认地块 (首次初始化时写入)
pub const DEFAULT_FIELD_NAMES: [&str; 3] = ["DF1B", "SS2B", "MF8B"];

/// 默认地块作物系数
pub const DEFAULT_CROP_FACTOR: f64 = 0.0;

/// 默认地块施肥周
pub const DEFAULT_FERTILIZER_WEEK: i64 = 1;

/// 初始化 schema（可在每次启动时重复调用）
pub fn init_schema(conn: &Connection) -> RepositoryResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS fields (
            field_name TEXT PRIMARY KEY,
            crop_factor REAL NOT NULL,
            fertilizer_week INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS weather_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL UNIQUE,
            et0 REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_weather_data_date
            ON weather_data(date);

        CREATE TABLE IF NOT EXISTS etc_calculations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            field_name TEXT NOT NULL,
            date TEXT NOT NULL,
            etc_value REAL NOT NULL,
            calculated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_etc_calculations_field_date
            ON etc_calculations(field_name, date);

        CREATE INDEX IF NOT EXISTS idx_etc_calculations_calculated_at
            ON etc_calculations(calculated_at);
        "#,
    )?;
    Ok(())
}

/// fields 表为空时写入默认地块
///
/// # 返回
/// - Ok(n): 写入的地块数 (非空库为 0)
pub fn seed_default_fields_if_empty(conn: &Connection) -> RepositoryResult<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM fields", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(0);
    }

    let tx = conn.unchecked_transaction()?;
    for name in DEFAULT_FIELD_NAMES {
        tx.execute(
            "INSERT INTO fields (field_name, crop_factor, fertilizer_week) VALUES (?1, ?2, ?3)",
            params![name, DEFAULT_CROP_FACTOR, DEFAULT_FERTILIZER_WEEK],
        )?;
    }
    tx.commit()?;

    info!(fields = ?DEFAULT_FIELD_NAMES, "默认地块已写入");
    Ok(DEFAULT_FIELD_NAMES.len())
}
