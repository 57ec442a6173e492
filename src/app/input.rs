// ==========================================
// 灌溉排程系统 - 用户输入解析
// ==========================================
// 非法输入返回 None,由交互层提示后重新输入
// ==========================================

use chrono::{Days, NaiveDate};

/// 解析非负浮点数 (ET0 / 作物系数)
pub fn parse_non_negative_f64(value: &str) -> Option<f64> {
    let parsed: f64 = value.trim().parse().ok()?;
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}

/// 解析施肥周 (正整数)
pub fn parse_positive_week(value: &str) -> Option<i64> {
    let parsed: i64 = value.trim().parse().ok()?;
    (parsed >= 1).then_some(parsed)
}

/// 可选过滤条件 (空白视为不过滤)
pub fn parse_optional_filter(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// 从明天开始的连续 n 个日期 (YYYY-MM-DD)
pub fn next_dates(today: NaiveDate, count: u32) -> Vec<String> {
    (1..=u64::from(count))
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect()
}
