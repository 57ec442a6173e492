// ==========================================
// 灌溉排程系统 - ETc 计算记录仓储
// ==========================================
// 红线: 批量保存必须在单一事务内完成 (全部成功或全部回滚)
// 红线: 同一 (field_name, date) 先删后插,任一时刻至多一行
// ==========================================

use crate::db::SharedConnection;
use crate::domain::{EtcRecord, EtcResults, WeatherObservation};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Local;
use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult};
use std::sync::MutexGuard;
use tracing::{debug, instrument};

/// calculated_at 时间戳格式 (字典序与时间序一致)
pub const CALCULATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// 当前本地时间戳
pub fn now_timestamp() -> String {
    Local::now().naive_local().format(CALCULATED_AT_FORMAT).to_string()
}

// ==========================================
// EtcRecordRepository - ETc 记录仓储
// ==========================================
pub struct EtcRecordRepository {
    conn: SharedConnection,
}

impl EtcRecordRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 追加单条 ETc 记录 (不替换旧行)
    pub fn insert(&self, field_name: &str, date: &str, etc_value: f64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO etc_calculations (field_name, date, etc_value, calculated_at) VALUES (?1, ?2, ?3, ?4)",
            params![field_name, date, etc_value, now_timestamp()],
        )?;
        Ok(())
    }

    /// 批量保存 ETc 结果,统一使用当前时间戳
    pub fn save_batch(
        &self,
        results: &EtcResults,
        observations: &[WeatherObservation],
    ) -> RepositoryResult<usize> {
        self.save_batch_at(results, observations, &now_timestamp())
    }

    /// 批量保存 ETc 结果
    ///
    /// 只处理同时出现在 `results` 与 `observations` 中的 (地块, 日期) 组合,
    /// 不匹配的组合静默跳过。每个组合先删除旧行再插入新行。
    ///
    /// # 返回
    /// - Ok(n): 写入的行数
    #[instrument(skip(self, results, observations), fields(fields = results.field_count(), dates = observations.len()))]
    pub fn save_batch_at(
        &self,
        results: &EtcResults,
        observations: &[WeatherObservation],
        calculated_at: &str,
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let mut written = 0;
        {
            let mut delete_stmt = tx.prepare_cached(
                "DELETE FROM etc_calculations WHERE field_name = ?1 AND date = ?2",
            )?;
            let mut insert_stmt = tx.prepare_cached(
                "INSERT INTO etc_calculations (field_name, date, etc_value, calculated_at) VALUES (?1, ?2, ?3, ?4)",
            )?;

            for (field_name, dates) in results.fields() {
                for observation in observations {
                    let date = observation.date();
                    let Some(etc_value) = dates.get(date) else {
                        continue;
                    };
                    delete_stmt.execute(params![field_name, date])?;
                    insert_stmt.execute(params![field_name, date, etc_value, calculated_at])?;
                    written += 1;
                }
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        debug!(written, calculated_at, "ETc 批量保存完成");
        Ok(written)
    }

    /// 查询 ETc 历史,按 calculated_at 倒序
    ///
    /// # 参数
    /// - `field_name`: 可选地块过滤
    /// - `date`: 可选日期过滤
    pub fn find_history(
        &self,
        field_name: Option<&str>,
        date: Option<&str>,
    ) -> RepositoryResult<Vec<EtcRecord>> {
        let mut sql = String::from(
            "SELECT field_name, date, etc_value, calculated_at FROM etc_calculations WHERE 1=1",
        );
        let mut args: Vec<&str> = Vec::new();

        if let Some(field_name) = field_name {
            sql.push_str(" AND field_name = ?");
            args.push(field_name);
        }
        if let Some(date) = date {
            sql.push_str(" AND date = ?");
            args.push(date);
        }
        sql.push_str(" ORDER BY calculated_at DESC, id DESC");

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(args), |row| {
                Ok(EtcRecord {
                    field_name: row.get(0)?,
                    date: row.get(1)?,
                    etc_value: row.get(2)?,
                    calculated_at: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(records)
    }
}
