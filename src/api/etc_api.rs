// ==========================================
// 灌溉排程系统 - ETc API
// ==========================================
// 职责: 重算并保存 ETc、生成 ETc 表格、查询历史
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::domain::EtcRecord;
use crate::engine::{EtcRecalcEngine, RecalcOutcome};
use crate::report::format_etc_table;
use crate::repository::EtcRecordRepository;

/// 表格与本次重算结果
#[derive(Debug, Clone)]
pub struct EtcTableView {
    pub outcome: RecalcOutcome,
    pub table: String,
}

// ==========================================
// EtcApi - ETc API
// ==========================================
pub struct EtcApi {
    recalc_engine: Arc<EtcRecalcEngine>,
    etc_repo: Arc<EtcRecordRepository>,
}

impl EtcApi {
    pub fn new(recalc_engine: Arc<EtcRecalcEngine>, etc_repo: Arc<EtcRecordRepository>) -> Self {
        Self {
            recalc_engine,
            etc_repo,
        }
    }

    /// 计算并保存指定日期的 ETc
    pub fn calculate_and_save(&self, dates: &[String]) -> ApiResult<RecalcOutcome> {
        Ok(self.recalc_engine.recalc_for_dates(dates)?)
    }

    /// 计算、保存并生成 ETc 表格
    ///
    /// 表格直接使用本次结果,不再回读存储
    pub fn calculate_table(&self, dates: &[String]) -> ApiResult<EtcTableView> {
        let outcome = self.recalc_engine.recalc_for_dates(dates)?;
        let table = format_etc_table(&outcome.fields, &outcome.observations, &outcome.results);
        Ok(EtcTableView { outcome, table })
    }

    /// 查询 ETc 历史 (calculated_at 倒序)
    pub fn history(
        &self,
        field_name: Option<&str>,
        date: Option<&str>,
    ) -> ApiResult<Vec<EtcRecord>> {
        Ok(self.etc_repo.find_history(field_name, date)?)
    }
}
