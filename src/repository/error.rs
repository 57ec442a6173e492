// ==========================================
// 灌溉排程系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 存储 I/O 错误向上传播,不在仓储内吞掉
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 键约束错误 =====
    #[error("{entity} '{id}' not found")]
    NotFound { entity: String, id: String },

    #[error("{entity} '{id}' already exists")]
    DuplicateKey { entity: String, id: String },

    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    // ===== 数据库错误 =====
    #[error("database lock poisoned: {0}")]
    LockError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),
}

impl RepositoryError {
    pub(crate) fn field_not_found(field_name: &str) -> Self {
        RepositoryError::NotFound {
            entity: "Field".to_string(),
            id: field_name.to_string(),
        }
    }

    pub(crate) fn field_exists(field_name: &str) -> Self {
        RepositoryError::DuplicateKey {
            entity: "Field".to_string(),
            id: field_name.to_string(),
        }
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("UNIQUE") => {
                RepositoryError::UniqueConstraintViolation(msg)
            }
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::DatabaseQueryError(msg),
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
