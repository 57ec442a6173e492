// ==========================================
// 灌溉排程系统 - 气象观测领域模型
// ==========================================
// 对齐: weather_data 表 (date 唯一)
// 红线: 日期为 YYYY-MM-DD 结构; et0 >= 0 (mm/day)
// ==========================================

use crate::domain::error::{ValidationError, ValidationResult};
use crate::domain::field::is_non_negative;
use serde::Serialize;

// ==========================================
// WeatherObservation - 每日 ET0 观测
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    date: String, // ISO 8601 日期
    et0: f64,     // 参考蒸散量 (mm/day)
}

impl WeatherObservation {
    /// 创建气象观测并校验
    ///
    /// 日期只做结构检查 (长度 10,第 5/8 位为 '-'),不做日历合法性校验。
    pub fn new(date: impl Into<String>, et0: f64) -> ValidationResult<Self> {
        let date = date.into();
        if !is_iso_date_shape(&date) {
            return Err(ValidationError::InvalidDate(date));
        }
        if !is_non_negative(et0) {
            return Err(ValidationError::InvalidEt0(et0));
        }

        Ok(Self { date, et0 })
    }

    /// 从存储行还原 (不做校验)
    pub(crate) fn from_storage(date: String, et0: f64) -> Self {
        Self { date, et0 }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn et0(&self) -> f64 {
        self.et0
    }
}

/// YYYY-MM-DD 结构检查
pub fn is_iso_date_shape(date: &str) -> bool {
    let mut len = 0;
    for (i, c) in date.chars().enumerate() {
        if (i == 4 || i == 7) && c != '-' {
            return false;
        }
        len += 1;
    }
    len == 10
}
