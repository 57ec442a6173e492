// ==========================================
// 灌溉排程系统 - ETc 表格
// ==========================================
// 行: 地块 (按名称字母序); 列: 观测日期 (按传入顺序)
// 单元格: ETc 保留两位小数,缺失为 N/A
// ==========================================

use crate::domain::{EtcResults, Field, WeatherObservation};

/// 缺失值标记
pub const MISSING_VALUE: &str = "N/A";

pub const NO_FIELDS_MESSAGE: &str = "No fields available to display.";

pub const NO_WEATHER_MESSAGE: &str = "No weather data available to display.";

/// 生成 Markdown 格式的 ETc 表格
pub fn format_etc_table(
    fields: &[Field],
    observations: &[WeatherObservation],
    results: &EtcResults,
) -> String {
    if fields.is_empty() {
        return NO_FIELDS_MESSAGE.to_string();
    }
    if observations.is_empty() {
        return NO_WEATHER_MESSAGE.to_string();
    }

    let mut sorted_fields: Vec<&Field> = fields.iter().collect();
    sorted_fields.sort_by(|a, b| a.field_name().cmp(b.field_name()));

    let dates: Vec<&str> = observations.iter().map(WeatherObservation::date).collect();

    let mut lines = Vec::with_capacity(sorted_fields.len() + 2);
    lines.push(format!("| Field | {} |", dates.join(" | ")));
    lines.push(format!("|{}|", vec![" --- "; dates.len() + 1].join("|")));

    for field in sorted_fields {
        let mut cells = Vec::with_capacity(dates.len() + 1);
        cells.push(field.field_name().to_string());
        for date in &dates {
            let cell = match results.get(field.field_name(), date) {
                Some(value) => format!("{:.2}", value),
                None => MISSING_VALUE.to_string(),
            };
            cells.push(cell);
        }
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    lines.join("\n")
}
