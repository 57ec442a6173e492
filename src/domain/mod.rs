// ==========================================
// 灌溉排程系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与构造期校验
// 红线: 不含数据访问逻辑,不含计算逻辑
// ==========================================

pub mod error;
pub mod etc_record;
pub mod field;
pub mod weather;

// 重导出核心类型
pub use error::{ValidationError, ValidationResult};
pub use etc_record::{EtcRecord, EtcResults};
pub use field::Field;
pub use weather::WeatherObservation;
