// ==========================================
// 灌溉排程系统 - 引擎层
// ==========================================
// 职责: ETc 计算与重算编排
// 红线: Engine 不拼 SQL, 数据访问经由 Repository
// ==========================================

pub mod etc_calculator;
pub mod recalc;

// 重导出核心引擎
pub use etc_calculator::EtcCalculator;
pub use recalc::{EtcRecalcEngine, RecalcError, RecalcOutcome};
