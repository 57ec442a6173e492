// ==========================================
// 灌溉排程系统 - 列表展示
// ==========================================

use crate::domain::{EtcRecord, Field, WeatherObservation};

/// 地块列表 (按名称排序)
pub fn format_field_table(fields: &[Field]) -> String {
    let mut sorted: Vec<&Field> = fields.iter().collect();
    sorted.sort_by(|a, b| a.field_name().cmp(b.field_name()));

    let mut lines = vec![
        format!("{:<15} {:<15} {:<15}", "Field Name", "Crop Factor", "Fertilizer Week"),
        "-".repeat(50),
    ];
    for field in sorted {
        lines.push(format!(
            "{:<15} {:<15.2} {:<15}",
            field.field_name(),
            field.crop_factor(),
            field.fertilizer_week()
        ));
    }
    lines.join("\n")
}

/// 气象观测列表
pub fn format_weather_table(observations: &[WeatherObservation]) -> String {
    if observations.is_empty() {
        return "No weather data recorded.".to_string();
    }

    let mut lines = vec![format!("{:<12} {:>10}", "Date", "ET0 (mm)"), "-".repeat(23)];
    for observation in observations {
        lines.push(format!("{:<12} {:>10.2}", observation.date(), observation.et0()));
    }
    lines.join("\n")
}

/// ETc 历史 (保持传入顺序,即 calculated_at 倒序)
pub fn format_etc_history(records: &[EtcRecord]) -> String {
    if records.is_empty() {
        return "No ETc history found.".to_string();
    }

    let mut lines = vec![
        "| Field | Date | ETc | Calculated At |".to_string(),
        "| --- | --- | --- | --- |".to_string(),
    ];
    for record in records {
        lines.push(format!(
            "| {} | {} | {:.2} | {} |",
            record.field_name, record.date, record.etc_value, record.calculated_at
        ));
    }
    lines.join("\n")
}
