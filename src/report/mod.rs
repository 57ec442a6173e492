// ==========================================
// 灌溉排程系统 - 报表层
// ==========================================
// 职责: 纯展示格式化,不做计算,不做 I/O
// ==========================================

pub mod etc_table;
pub mod listing;

pub use etc_table::{format_etc_table, MISSING_VALUE, NO_FIELDS_MESSAGE, NO_WEATHER_MESSAGE};
pub use listing::{format_etc_history, format_field_table, format_weather_table};
