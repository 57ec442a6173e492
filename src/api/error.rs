// ==========================================
// 灌溉排程系统 - API层错误类型
// ==========================================
// 职责: 将仓储/引擎错误转换为面向用户的错误消息
// ==========================================

use crate::domain::ValidationError;
use crate::engine::RecalcError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入与业务规则错误
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    // ==========================================
    // 重算错误 (数据不全 / 计算失败)
    // ==========================================
    #[error(transparent)]
    Recalc(#[from] RecalcError),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} '{}'", entity, id))
            }
            RepositoryError::DuplicateKey { entity, id } => {
                ApiError::AlreadyExists(format!("{} '{}'", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::LockError(msg)
            | RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
