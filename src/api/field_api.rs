// ==========================================
// 灌溉排程系统 - 地块管理 API
// ==========================================
// 职责: 地块列表、新增、修改、删除、存在性检查
// ==========================================

use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::Field;
use crate::repository::FieldRepository;

// ==========================================
// FieldApi - 地块管理 API
// ==========================================
pub struct FieldApi {
    field_repo: Arc<FieldRepository>,
}

impl FieldApi {
    pub fn new(field_repo: Arc<FieldRepository>) -> Self {
        Self { field_repo }
    }

    /// 查询全部地块 (无序)
    pub fn list_fields(&self) -> ApiResult<Vec<Field>> {
        Ok(self.field_repo.list_all()?)
    }

    /// 按名称查询地块
    ///
    /// # 返回
    /// - Err(NotFound): 地块不存在
    pub fn get_field(&self, field_name: &str) -> ApiResult<Field> {
        self.field_repo
            .find_by_name(field_name)?
            .ok_or_else(|| ApiError::NotFound(format!("Field '{}'", field_name)))
    }

    pub fn field_exists(&self, field_name: &str) -> ApiResult<bool> {
        Ok(self.field_repo.exists(field_name)?)
    }

    /// 新增地块
    ///
    /// # 返回
    /// - Err(InvalidInput): 校验失败
    /// - Err(AlreadyExists): 同名地块已存在
    pub fn create_field(
        &self,
        field_name: &str,
        crop_factor: f64,
        fertilizer_week: i64,
    ) -> ApiResult<Field> {
        let field = Field::new(field_name, crop_factor, fertilizer_week)?;
        self.field_repo.create(&field)?;
        info!(field_name, crop_factor, fertilizer_week, "新增地块");
        Ok(field)
    }

    /// 修改地块作物系数与施肥周
    pub fn update_field(
        &self,
        field_name: &str,
        crop_factor: f64,
        fertilizer_week: i64,
    ) -> ApiResult<Field> {
        let field = Field::new(field_name, crop_factor, fertilizer_week)?;
        self.field_repo.update(&field)?;
        info!(field_name, crop_factor, fertilizer_week, "修改地块");
        Ok(field)
    }

    /// 删除地块 (ETc 历史保留)
    pub fn delete_field(&self, field_name: &str) -> ApiResult<()> {
        self.field_repo.delete(field_name)?;
        info!(field_name, "删除地块");
        Ok(())
    }
}
