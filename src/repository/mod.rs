// ==========================================
// 灌溉排程系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod etc_record_repo;
pub mod field_repo;
pub mod schema;
pub mod weather_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use etc_record_repo::{now_timestamp, EtcRecordRepository, CALCULATED_AT_FORMAT};
pub use field_repo::FieldRepository;
pub use schema::{init_schema, seed_default_fields_if_empty, DEFAULT_FIELD_NAMES};
pub use weather_repo::WeatherRepository;
