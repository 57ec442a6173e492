// ==========================================
// 灌溉排程系统 - 应用状态
// ==========================================
// 职责: 管理共享连接与各 API 实例
// 说明: 建表/默认数据由入口显式调用 initialize_store
// ==========================================

use std::sync::Arc;
use tracing::info;

use crate::api::{EtcApi, FieldApi, WeatherApi};
use crate::db::{open_in_memory_shared, open_shared_connection, SharedConnection};
use crate::engine::EtcRecalcEngine;
use crate::repository::{
    init_schema, seed_default_fields_if_empty, EtcRecordRepository, FieldRepository,
    RepositoryError, RepositoryResult, WeatherRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    conn: SharedConnection,

    /// 地块API
    pub field_api: Arc<FieldApi>,

    /// ET0 观测API
    pub weather_api: Arc<WeatherApi>,

    /// ETc API
    pub etc_api: Arc<EtcApi>,
}

impl AppState {
    /// 打开数据库文件并组装状态
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        info!("打开数据库: {}", db_path);
        Ok(Self::from_connection(open_shared_connection(db_path)?))
    }

    /// 内存数据库 (测试/临时会话)
    pub fn in_memory() -> RepositoryResult<Self> {
        Ok(Self::from_connection(open_in_memory_shared()?))
    }

    /// 从共享连接组装仓储、引擎与API
    pub fn from_connection(conn: SharedConnection) -> Self {
        let field_repo = Arc::new(FieldRepository::new(conn.clone()));
        let weather_repo = Arc::new(WeatherRepository::new(conn.clone()));
        let etc_repo = Arc::new(EtcRecordRepository::new(conn.clone()));

        let recalc_engine = Arc::new(EtcRecalcEngine::new(
            field_repo.clone(),
            weather_repo.clone(),
            etc_repo.clone(),
        ));

        Self {
            conn,
            field_api: Arc::new(FieldApi::new(field_repo)),
            weather_api: Arc::new(WeatherApi::new(weather_repo)),
            etc_api: Arc::new(EtcApi::new(recalc_engine, etc_repo)),
        }
    }

    /// 建表并在空库时写入默认地块 (幂等)
    ///
    /// # 返回
    /// - Ok(n): 本次写入的默认地块数
    pub fn initialize_store(&self) -> RepositoryResult<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        init_schema(&conn)?;
        seed_default_fields_if_empty(&conn)
    }
}
