// ==========================================
// 灌溉排程系统 - 气象观测数据仓储
// ==========================================
// 红线: 每个日期至多一条观测 (UPSERT 覆盖)
// ==========================================

use crate::db::SharedConnection;
use crate::domain::WeatherObservation;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::MutexGuard;
use tracing::debug;

// ==========================================
// WeatherRepository - 气象观测仓储
// ==========================================
pub struct WeatherRepository {
    conn: SharedConnection,
}

impl WeatherRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 保存观测 (同日期已存在则覆盖 et0)
    pub fn upsert(&self, observation: &WeatherObservation) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO weather_data (date, et0) VALUES (?1, ?2)
            ON CONFLICT(date) DO UPDATE SET et0 = excluded.et0
            "#,
            params![observation.date(), observation.et0()],
        )?;
        debug!(date = observation.date(), et0 = observation.et0(), "ET0 已保存");
        Ok(())
    }

    /// 按日期查询
    pub fn find_by_date(&self, date: &str) -> RepositoryResult<Option<WeatherObservation>> {
        let conn = self.get_conn()?;
        let observation = conn
            .query_row(
                "SELECT date, et0 FROM weather_data WHERE date = ?1",
                params![date],
                map_observation_row,
            )
            .optional()?;
        Ok(observation)
    }

    /// 按日期集合查询,按日期升序
    ///
    /// 缺失的日期不会出现在结果中,调用方需比对请求集合自行判断缺口。
    pub fn find_by_dates(&self, dates: &[String]) -> RepositoryResult<Vec<WeatherObservation>> {
        if dates.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; dates.len()].join(",");
        let sql = format!(
            "SELECT date, et0 FROM weather_data WHERE date IN ({}) ORDER BY date ASC",
            placeholders
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let observations = stmt
            .query_map(params_from_iter(dates.iter()), map_observation_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(observations)
    }

    /// 查询全部观测,按日期升序
    pub fn list_all(&self) -> RepositoryResult<Vec<WeatherObservation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT date, et0 FROM weather_data ORDER BY date ASC")?;
        let observations = stmt
            .query_map([], map_observation_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(observations)
    }
}

fn map_observation_row(row: &Row<'_>) -> SqliteResult<WeatherObservation> {
    Ok(WeatherObservation::from_storage(row.get(0)?, row.get(1)?))
}
