// ==========================================
// 灌溉排程系统 - ETc 计算器
// ==========================================
// 公式: ETc = ET0 × Kc
// 红线: 纯计算,无 I/O; 不做取整 (取整仅在展示时进行)
// ==========================================

use crate::domain::{EtcResults, Field, WeatherObservation};

// ==========================================
// EtcCalculator - ETc 计算器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct EtcCalculator;

impl EtcCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 单地块单日 ETc
    pub fn compute_etc(&self, field: &Field, observation: &WeatherObservation) -> f64 {
        observation.et0() * field.crop_factor()
    }

    /// 全部地块 × 全部观测的 ETc
    ///
    /// # 返回
    /// 每个地块每个观测日期一条结果
    pub fn compute_for_all_fields(
        &self,
        fields: &[Field],
        observations: &[WeatherObservation],
    ) -> EtcResults {
        let mut results = EtcResults::new();
        for field in fields {
            for observation in observations {
                results.insert(
                    field.field_name(),
                    observation.date(),
                    self.compute_etc(field, observation),
                );
            }
        }
        results
    }
}
