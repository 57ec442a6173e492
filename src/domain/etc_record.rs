// ==========================================
// 灌溉排程系统 - ETc 历史记录与计算结果
// ==========================================
// 对齐: etc_calculations 表
// 红线: 同一 (field_name, date) 任一时刻至多一行; 删除地块不级联
// ==========================================

use serde::Serialize;
use std::collections::HashMap;

/// ETc 计算记录
///
/// 表示"某地块某日的 ETc 在 calculated_at 时刻计算为 etc_value"。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtcRecord {
    pub field_name: String,
    pub date: String,
    pub etc_value: f64,
    pub calculated_at: String, // ISO 8601 时间戳,字典序即时间序
}

// ==========================================
// EtcResults - 地块 → 日期 → ETc 两级映射
// ==========================================
// 展示顺序由报表层显式排序决定,这里不保证迭代顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EtcResults {
    by_field: HashMap<String, HashMap<String, f64>>,
}

impl EtcResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入 (同一地块同一日期覆盖)
    pub fn insert(&mut self, field_name: &str, date: &str, etc_value: f64) {
        self.by_field
            .entry(field_name.to_string())
            .or_default()
            .insert(date.to_string(), etc_value);
    }

    /// 按 (地块, 日期) 查询
    pub fn get(&self, field_name: &str, date: &str) -> Option<f64> {
        self.by_field
            .get(field_name)
            .and_then(|dates| dates.get(date))
            .copied()
    }

    /// 遍历各地块的日期结果
    pub fn fields(&self) -> impl Iterator<Item = (&str, &HashMap<String, f64>)> + '_ {
        self.by_field
            .iter()
            .map(|(field_name, dates)| (field_name.as_str(), dates))
    }

    pub fn contains_field(&self, field_name: &str) -> bool {
        self.by_field.contains_key(field_name)
    }

    /// 地块数
    pub fn field_count(&self) -> usize {
        self.by_field.len()
    }

    /// (地块, 日期) 组合总数
    pub fn len(&self) -> usize {
        self.by_field.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 遍历全部 (地块, 日期, ETc)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.by_field.iter().flat_map(|(field_name, dates)| {
            dates
                .iter()
                .map(move |(date, value)| (field_name.as_str(), date.as_str(), *value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut results = EtcResults::new();
        results.insert("DF1B", "2024-06-01", 4.0);
        results.insert("DF1B", "2024-06-02", 3.2);
        results.insert("SS2B", "2024-06-01", 0.0);

        assert_eq!(results.get("DF1B", "2024-06-01"), Some(4.0));
        assert_eq!(results.get("SS2B", "2024-06-02"), None);
        assert_eq!(results.get("MF8B", "2024-06-01"), None);
        assert_eq!(results.field_count(), 2);
        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().count(), 3);
    }

    #[test]
    fn test_insert_overwrites_pair() {
        let mut results = EtcResults::new();
        results.insert("DF1B", "2024-06-01", 4.0);
        results.insert("DF1B", "2024-06-01", 5.0);

        assert_eq!(results.len(), 1);
        assert_eq!(results.get("DF1B", "2024-06-01"), Some(5.0));
    }
}
