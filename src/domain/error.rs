// ==========================================
// 灌溉排程系统 - 领域校验错误
// ==========================================
// 工具: thiserror 派生宏
// 红线: 非法实体在构造时即被拒绝,不得进入内存或存储
// ==========================================

use thiserror::Error;

/// 实体构造校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("field name must be a non-empty string")]
    EmptyFieldName,

    #[error("crop factor must be a non-negative number (got {0})")]
    InvalidCropFactor(f64),

    #[error("fertilizer week must be a positive integer (got {0})")]
    InvalidFertilizerWeek(i64),

    #[error("date must be in ISO 8601 format (YYYY-MM-DD), got '{0}'")]
    InvalidDate(String),

    #[error("ET0 must be a non-negative number (got {0})")]
    InvalidEt0(f64),
}

/// Result 类型别名
pub type ValidationResult<T> = Result<T, ValidationError>;
