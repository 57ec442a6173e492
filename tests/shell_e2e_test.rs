// ==========================================
// 交互式菜单端到端测试
// ==========================================
// 测试目标: 预置输入驱动完整会话,校验输出与存储
// 固定"今天"为 2024-05-31,录入/计算日期从 2024-06-01 开始
// ==========================================


use chrono::NaiveDate;
use irrigation_scheduler::app::{AppState, ScriptedPrompter, Shell};
use irrigation_scheduler::logging;

// ==========================================
// 辅助函数
// ==========================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
}

/// 运行一次会话,返回输出文本与剩余未消费输入数
fn run_session(state: &AppState, forecast_days: u32, lines: &[&str]) -> (String, usize) {
    let prompter = ScriptedPrompter::new(lines.iter().copied());
    let mut shell = Shell::new(state, prompter, Vec::new())
        .with_forecast_days(forecast_days)
        .with_today(today());
    shell.run().unwrap();

    let (prompter, out) = shell.into_parts();
    (String::from_utf8(out).unwrap(), prompter.remaining())
}

fn seeded_state() -> (tempfile::NamedTempFile, AppState) {
    let (tmp, db_path) = test_helpers::create_test_db().unwrap();
    let state = AppState::open(&db_path).unwrap();
    state.initialize_store().unwrap();
    (tmp, state)
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_edit_weather_and_view_table() {
    // 初始化日志系统
    logging::init_test();

    let (_tmp, state) = seeded_state();

    let (output, remaining) = run_session(
        &state,
        1,
        &[
            "3", "DF1B", "0.8", "", // 修改作物系数,保留施肥周
            "5", "5", // 录入 2024-06-01 的 ET0
            "6", // 查看 ETc 表格
            "9",
        ],
    );

    assert_eq!(remaining, 0);
    assert!(output.contains("Successfully updated field 'DF1B'."));
    assert!(output.contains("ETc values have been calculated and saved."));
    assert!(output.contains("| Field | 2024-06-01 |"));
    assert!(output.contains("| DF1B | 4.00 |"));
    assert!(output.contains("| MF8B | 0.00 |"));
    assert!(output.contains("Goodbye!"));

    let field = state.field_api.get_field("DF1B").unwrap();
    assert_eq!(field.crop_factor(), 0.8);
    assert_eq!(field.fertilizer_week(), 1);
}

#[test]
fn test_missing_weather_reported_per_date() {
    let (_tmp, state) = seeded_state();

    let (output, _) = run_session(&state, 2, &["6", "9"]);

    assert!(output.contains("Error: Missing ET0 value for 2024-06-01. Please enter a value."));
    assert!(output.contains("Error: Missing ET0 value for 2024-06-02. Please enter a value."));
    assert!(!output.contains("=== ETc Table ==="));
    assert!(state.etc_api.history(None, None).unwrap().is_empty());
}

#[test]
fn test_add_field_reprompts_on_bad_input() {
    let (_tmp, state) = seeded_state();

    let (output, remaining) = run_session(
        &state,
        1,
        &[
            "2", "", "DF1B", "Orchard", // 空名称、重名后输入新名称
            "abc", "-1", "1.15", // 非法作物系数后重新输入
            "0", "2", // 非法施肥周后重新输入
            "1", "9",
        ],
    );

    assert_eq!(remaining, 0);
    assert!(output.contains("Error: Field name cannot be empty."));
    assert!(output.contains("Error: Field 'DF1B' already exists."));
    assert_eq!(
        output
            .matches("Error: Crop factor must be a non-negative number.")
            .count(),
        2
    );
    assert!(output.contains("Error: Fertilizer week must be a positive integer."));
    assert!(output.contains("Successfully added field 'Orchard'."));
    assert!(output.contains("Orchard"));

    let field = state.field_api.get_field("Orchard").unwrap();
    assert_eq!(field.crop_factor(), 1.15);
    assert_eq!(field.fertilizer_week(), 2);
}

#[test]
fn test_delete_requires_confirmation() {
    let (_tmp, state) = seeded_state();

    let (output, _) = run_session(
        &state,
        1,
        &["4", "SS2B", "no", "4", "GHOST", "4", "SS2B", "YES", "9"],
    );

    assert!(output.contains("Deletion cancelled."));
    assert!(output.contains("Error: Field 'GHOST' not found."));
    assert!(output.contains("Successfully deleted field 'SS2B'."));
    assert!(!state.field_api.field_exists("SS2B").unwrap());
}

#[test]
fn test_invalid_menu_option_and_closed_input() {
    let (_tmp, state) = seeded_state();

    let (output, remaining) = run_session(&state, 1, &["42"]);

    assert_eq!(remaining, 0);
    assert!(output.contains("Invalid option. Please select 1-9."));
    assert!(output.contains("Input closed. Goodbye!"));
}

#[test]
fn test_invalid_crop_factor_blocks_table() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let state = AppState::from_connection(conn.clone());
    state.initialize_store().unwrap();
    state
        .weather_api
        .save_observation("2024-06-01", 5.0)
        .unwrap();
    test_helpers::corrupt_crop_factor(&conn, "SS2B", -1.0);

    let (output, remaining) = run_session(&state, 1, &["6", "9"]);

    assert_eq!(remaining, 0);
    assert!(output
        .contains("Error: Crop factor for 'SS2B' is invalid. Please enter a float value."));
    assert!(!output.contains("Crop factor for 'DF1B' is invalid"));
    assert!(!output.contains("=== ETc Table ==="));
    assert!(!output.contains("| DF1B |"));
    // 不计算也不写入
    assert!(state.etc_api.history(None, None).unwrap().is_empty());
}

#[test]
fn test_missing_weather_checked_before_crop_factor() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    let state = AppState::from_connection(conn.clone());
    state.initialize_store().unwrap();
    test_helpers::corrupt_crop_factor(&conn, "SS2B", -1.0);

    let (output, _) = run_session(&state, 1, &["6", "9"]);

    assert!(output.contains("Error: Missing ET0 value for 2024-06-01. Please enter a value."));
    assert!(!output.contains("Crop factor for 'SS2B' is invalid"));
}

#[test]
fn test_no_fields_reported_in_table_view() {
    let (_tmp, _conn, state) = test_helpers::setup_state();

    let (output, _) = run_session(&state, 1, &["6", "9"]);

    assert!(output.contains("Error: No fields provided. Please enter at least one field."));
    assert!(!output.contains("Missing ET0 value"));
}

#[test]
fn test_history_and_weather_views() {
    let (_tmp, state) = seeded_state();

    let (output, _) = run_session(
        &state,
        2,
        &[
            "5", "4.5", "3", // 两天 ET0
            "8", // 查看气象
            "7", "DF1B", "2024-06-02", // 按地块与日期过滤历史
            "9",
        ],
    );

    assert!(output.contains("2024-06-01"));
    assert!(output.contains("4.50"));
    assert!(output.contains("| Field | Date | ETc | Calculated At |"));
    assert!(output.contains("| DF1B | 2024-06-02 | 0.00 |"));
    assert!(!output.contains("| DF1B | 2024-06-01 | 0.00 |"));
}
