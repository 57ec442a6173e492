// ==========================================
// 灌溉排程系统 - 地块领域模型
// ==========================================
// 对齐: fields 表 (field_name 主键)
// 红线: field_name 非空; crop_factor >= 0; fertilizer_week >= 1
// ==========================================

use crate::domain::error::{ValidationError, ValidationResult};
use serde::Serialize;

// ==========================================
// Field - 地块
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    field_name: String,   // 地块名称 (区分大小写)
    crop_factor: f64,     // 作物系数 Kc
    fertilizer_week: i64, // 施肥周
}

impl Field {
    /// 创建地块并校验
    ///
    /// # 返回
    /// - Ok(Field): 校验通过
    /// - Err(ValidationError): 名称为空、作物系数为负或施肥周 < 1
    pub fn new(
        field_name: impl Into<String>,
        crop_factor: f64,
        fertilizer_week: i64,
    ) -> ValidationResult<Self> {
        let field_name = field_name.into();
        if field_name.trim().is_empty() {
            return Err(ValidationError::EmptyFieldName);
        }
        if !is_non_negative(crop_factor) {
            return Err(ValidationError::InvalidCropFactor(crop_factor));
        }
        if fertilizer_week < 1 {
            return Err(ValidationError::InvalidFertilizerWeek(fertilizer_week));
        }

        Ok(Self {
            field_name,
            crop_factor,
            fertilizer_week,
        })
    }

    /// 从存储行还原 (不做校验)
    ///
    /// 存储中可能存在被外部改写的脏数据,由重算引擎的有效地块过滤负责剔除。
    pub(crate) fn from_storage(field_name: String, crop_factor: f64, fertilizer_week: i64) -> Self {
        Self {
            field_name,
            crop_factor,
            fertilizer_week,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn crop_factor(&self) -> f64 {
        self.crop_factor
    }

    pub fn fertilizer_week(&self) -> i64 {
        self.fertilizer_week
    }

    /// 作物系数是否可参与 ETc 计算
    pub fn has_valid_crop_factor(&self) -> bool {
        is_non_negative(self.crop_factor)
    }
}

/// 有限且非负 (NaN 视为非法)
pub(crate) fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
