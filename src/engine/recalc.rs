// ==========================================
// 灌溉排程系统 - ETc 重算引擎
// ==========================================
// 职责: 读取地块/观测 → 计算 → 批量持久化 → 返回本次结果
// 红线: 请求日期缺任一观测即整批失败,不做部分持久化
// 红线: 只有非负作物系数的地块参与计算
// ==========================================

use crate::domain::{EtcResults, Field, WeatherObservation};
use crate::engine::etc_calculator::EtcCalculator;
use crate::repository::{
    now_timestamp, EtcRecordRepository, FieldRepository, RepositoryError, WeatherRepository,
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// ==========================================
// RecalcError - 重算失败原因
// ==========================================
/// 重算失败原因
///
/// 数据不全类错误逐项列出缺失内容,便于调用方精确提示补录。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecalcError {
    #[error("no dates requested")]
    NoDates,

    #[error("no fields available")]
    NoFields,

    #[error("missing ET0 value for: {}", .dates.join(", "))]
    MissingObservations { dates: Vec<String> },

    #[error("no field has a valid crop factor (rejected: {})", .rejected.join(", "))]
    NoValidFields { rejected: Vec<String> },

    #[error("could not calculate ETc values")]
    Storage,
}

impl RecalcError {
    /// 是否为数据不全 (可通过补录数据恢复)
    pub fn is_incomplete_data(&self) -> bool {
        !matches!(self, RecalcError::Storage)
    }
}

impl From<RepositoryError> for RecalcError {
    fn from(err: RepositoryError) -> Self {
        // 存储细节只进日志,不向调用方暴露
        error!(error = %err, "ETc 重算存储失败");
        RecalcError::Storage
    }
}

// ==========================================
// RecalcOutcome - 重算结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RecalcOutcome {
    pub results: EtcResults,                   // 本次计算结果
    pub fields: Vec<Field>,                    // 参与计算的地块
    pub observations: Vec<WeatherObservation>, // 参与计算的观测 (日期升序)
    pub excluded_fields: Vec<String>,          // 因作物系数非法被排除的地块
    pub calculated_at: String,                 // 本批次时间戳
    pub rows_written: usize,                   // 写入行数
}

// ==========================================
// EtcRecalcEngine - ETc 重算引擎
// ==========================================
pub struct EtcRecalcEngine {
    field_repo: Arc<FieldRepository>,
    weather_repo: Arc<WeatherRepository>,
    etc_repo: Arc<EtcRecordRepository>,
    calculator: EtcCalculator,
}

impl EtcRecalcEngine {
    pub fn new(
        field_repo: Arc<FieldRepository>,
        weather_repo: Arc<WeatherRepository>,
        etc_repo: Arc<EtcRecordRepository>,
    ) -> Self {
        Self {
            field_repo,
            weather_repo,
            etc_repo,
            calculator: EtcCalculator::new(),
        }
    }

    /// 计算并保存指定日期的 ETc
    ///
    /// 步骤:
    /// 1. 读取全部地块 (无地块则失败)
    /// 2. 读取请求日期的观测 (缺任一日期则失败)
    /// 3. 过滤非负作物系数地块 (全部非法则失败)
    /// 4. 计算 ETc
    /// 5. 单事务批量保存 (同组合先删后插)
    #[instrument(skip(self, dates), fields(requested = dates.len()))]
    pub fn recalc_for_dates(&self, dates: &[String]) -> Result<RecalcOutcome, RecalcError> {
        let requested = dedup_preserving_order(dates);
        if requested.is_empty() {
            return Err(RecalcError::NoDates);
        }

        // 1. 地块
        let fields = self.field_repo.list_all()?;
        if fields.is_empty() {
            warn!("无地块,跳过 ETc 计算");
            return Err(RecalcError::NoFields);
        }

        // 2. 观测 (必须完整覆盖)
        let observations = self.weather_repo.find_by_dates(&requested)?;
        let missing = missing_dates(&requested, &observations);
        if !missing.is_empty() {
            warn!(missing = ?missing, "ET0 观测不完整,本批次不计算");
            return Err(RecalcError::MissingObservations { dates: missing });
        }

        // 3. 有效地块
        let (valid_fields, invalid_fields): (Vec<Field>, Vec<Field>) = fields
            .into_iter()
            .partition(Field::has_valid_crop_factor);
        let excluded_fields: Vec<String> = invalid_fields
            .iter()
            .map(|f| f.field_name().to_string())
            .collect();
        if !excluded_fields.is_empty() {
            warn!(excluded = ?excluded_fields, "作物系数非法的地块已排除");
        }
        if valid_fields.is_empty() {
            return Err(RecalcError::NoValidFields {
                rejected: excluded_fields,
            });
        }

        // 4. 计算
        let results = self
            .calculator
            .compute_for_all_fields(&valid_fields, &observations);

        // 5. 持久化
        let calculated_at = now_timestamp();
        let rows_written = self
            .etc_repo
            .save_batch_at(&results, &observations, &calculated_at)?;

        info!(
            fields = valid_fields.len(),
            dates = observations.len(),
            rows_written,
            "ETc 重算完成"
        );

        Ok(RecalcOutcome {
            results,
            fields: valid_fields,
            observations,
            excluded_fields,
            calculated_at,
            rows_written,
        })
    }
}

fn dedup_preserving_order(dates: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    dates
        .iter()
        .filter(|d| seen.insert(d.as_str()))
        .cloned()
        .collect()
}

fn missing_dates(requested: &[String], observations: &[WeatherObservation]) -> Vec<String> {
    let present: HashSet<&str> = observations.iter().map(WeatherObservation::date).collect();
    requested
        .iter()
        .filter(|d| !present.contains(d.as_str()))
        .cloned()
        .collect()
}
