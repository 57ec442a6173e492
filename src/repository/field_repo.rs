// ==========================================
// 灌溉排程系统 - 地块数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: 删除地块不触碰 etc_calculations 历史
// ==========================================

use crate::db::SharedConnection;
use crate::domain::Field;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::MutexGuard;
use tracing::debug;

// ==========================================
// FieldRepository - 地块仓储
// ==========================================
/// 地块仓储
/// 职责: 管理 fields 表的 CRUD 操作
pub struct FieldRepository {
    conn: SharedConnection,
}

impl FieldRepository {
    /// 从共享连接创建仓储实例
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建地块
    ///
    /// # 返回
    /// - Ok(()): 写入成功
    /// - Err(DuplicateKey): 同名地块已存在,原记录不变
    pub fn create(&self, field: &Field) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let result = conn.execute(
            "INSERT INTO fields (field_name, crop_factor, fertilizer_week) VALUES (?1, ?2, ?3)",
            params![field.field_name(), field.crop_factor(), field.fertilizer_week()],
        );

        match result {
            Ok(_) => {
                debug!(field_name = field.field_name(), "地块已创建");
                Ok(())
            }
            Err(e) => match RepositoryError::from(e) {
                RepositoryError::UniqueConstraintViolation(_) => {
                    Err(RepositoryError::field_exists(field.field_name()))
                }
                other => Err(other),
            },
        }
    }

    /// 按名称查询
    ///
    /// # 返回
    /// - Ok(Some(Field)): 找到地块
    /// - Ok(None): 未找到
    pub fn find_by_name(&self, field_name: &str) -> RepositoryResult<Option<Field>> {
        let conn = self.get_conn()?;
        let field = conn
            .query_row(
                "SELECT field_name, crop_factor, fertilizer_week FROM fields WHERE field_name = ?1",
                params![field_name],
                map_field_row,
            )
            .optional()?;
        Ok(field)
    }

    /// 查询全部地块 (无序,展示时由调用方排序)
    pub fn list_all(&self) -> RepositoryResult<Vec<Field>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT field_name, crop_factor, fertilizer_week FROM fields")?;
        let fields = stmt
            .query_map([], map_field_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(fields)
    }

    /// 覆写作物系数与施肥周
    ///
    /// # 返回
    /// - Err(NotFound): 地块不存在,不做任何修改
    pub fn update(&self, field: &Field) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE fields SET crop_factor = ?1, fertilizer_week = ?2 WHERE field_name = ?3",
            params![field.crop_factor(), field.fertilizer_week(), field.field_name()],
        )?;
        if rows == 0 {
            return Err(RepositoryError::field_not_found(field.field_name()));
        }
        debug!(field_name = field.field_name(), "地块已更新");
        Ok(())
    }

    /// 删除地块
    ///
    /// # 返回
    /// - Err(NotFound): 地块不存在
    pub fn delete(&self, field_name: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM fields WHERE field_name = ?1", params![field_name])?;
        if rows == 0 {
            return Err(RepositoryError::field_not_found(field_name));
        }
        debug!(field_name, "地块已删除");
        Ok(())
    }

    /// 地块是否存在
    pub fn exists(&self, field_name: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM fields WHERE field_name = ?1",
                params![field_name],
                |_row| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn map_field_row(row: &Row<'_>) -> SqliteResult<Field> {
    Ok(Field::from_storage(row.get(0)?, row.get(1)?, row.get(2)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_shared;
    use crate::repository::schema::init_schema;

    fn setup_repo() -> FieldRepository {
        let conn = open_in_memory_shared().unwrap();
        init_schema(&conn.lock().unwrap()).unwrap();
        FieldRepository::new(conn)
    }

    #[test]
    fn test_create_and_find() {
        let repo = setup_repo();
        let field = Field::new("F", 0.5, 3).unwrap();
        repo.create(&field).unwrap();

        let found = repo.find_by_name("F").unwrap();
        assert_eq!(found, Some(field));
    }

    #[test]
    fn test_create_duplicate_rejected() {
        let repo = setup_repo();
        repo.create(&Field::new("F", 0.5, 3).unwrap()).unwrap();

        let err = repo.create(&Field::new("F", 0.9, 4).unwrap()).unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateKey { .. }));

        // 原记录不变
        let found = repo.find_by_name("F").unwrap().unwrap();
        assert_eq!(found.crop_factor(), 0.5);
        assert_eq!(found.fertilizer_week(), 3);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let repo = setup_repo();
        repo.create(&Field::new("df1b", 0.5, 1).unwrap()).unwrap();
        repo.create(&Field::new("DF1B", 0.6, 1).unwrap()).unwrap();

        assert_eq!(repo.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_update_existing_and_missing() {
        let repo = setup_repo();
        repo.create(&Field::new("F", 0.5, 3).unwrap()).unwrap();

        repo.update(&Field::new("F", 1.1, 7).unwrap()).unwrap();
        let found = repo.find_by_name("F").unwrap().unwrap();
        assert_eq!(found.crop_factor(), 1.1);
        assert_eq!(found.fertilizer_week(), 7);

        let err = repo.update(&Field::new("G", 1.0, 1).unwrap()).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
        assert!(!repo.exists("G").unwrap());
    }

    #[test]
    fn test_delete_then_not_found() {
        let repo = setup_repo();
        repo.create(&Field::new("F", 0.5, 3).unwrap()).unwrap();
        assert!(repo.exists("F").unwrap());

        repo.delete("F").unwrap();
        assert!(!repo.exists("F").unwrap());
        assert_eq!(repo.find_by_name("F").unwrap(), None);

        let err = repo.delete("F").unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }
}
