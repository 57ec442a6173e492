// ==========================================
// Recalc Engine 集成测试
// ==========================================
// 测试范围:
// 1. 计算并保存 → 历史记录
// 2. 重复计算同一组合只保留最新一行
// 3. 观测缺失时整批不写入
// 4. 作物系数非法的地块被排除
// 5. 删除地块后历史保留
// ==========================================


use irrigation_scheduler::api::ApiError;
use irrigation_scheduler::app::AppState;
use irrigation_scheduler::RecalcError;
use irrigation_scheduler::logging;

// ==========================================
// 辅助函数
// ==========================================

fn seed_two_fields(state: &AppState) {
    state.field_api.create_field("DF1B", 0.8, 1).unwrap();
    state.field_api.create_field("SS2B", 0.5, 2).unwrap();
}

fn seed_weather(state: &AppState, rows: &[(&str, f64)]) {
    for (date, et0) in rows {
        state.weather_api.save_observation(date, *et0).unwrap();
    }
}

fn recalc_error(result: Result<impl std::fmt::Debug, ApiError>) -> RecalcError {
    match result {
        Err(ApiError::Recalc(err)) => err,
        other => panic!("expected recalc error, got {:?}", other),
    }
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_calculate_and_save_writes_every_pair() {
    // 初始化日志系统
    logging::init_test();

    let (_tmp, _conn, state) = test_helpers::setup_state();
    seed_two_fields(&state);
    seed_weather(&state, &[("2024-06-01", 5.0), ("2024-06-02", 3.0)]);

    let outcome = state
        .etc_api
        .calculate_and_save(&test_helpers::dates(&["2024-06-01", "2024-06-02"]))
        .unwrap();

    assert_eq!(outcome.rows_written, 4);
    assert_eq!(outcome.results.get("DF1B", "2024-06-01"), Some(0.8 * 5.0));
    assert_eq!(outcome.results.get("SS2B", "2024-06-02"), Some(0.5 * 3.0));
    assert!(outcome.excluded_fields.is_empty());

    let history = state.etc_api.history(None, None).unwrap();
    assert_eq!(history.len(), 4);
    assert!(history
        .iter()
        .all(|r| r.calculated_at == outcome.calculated_at));
}

#[test]
fn test_recalc_keeps_one_row_per_pair() {
    let (_tmp, _conn, state) = test_helpers::setup_state();
    seed_two_fields(&state);
    seed_weather(&state, &[("2024-06-01", 5.0)]);
    let dates = test_helpers::dates(&["2024-06-01"]);

    let first = state.etc_api.calculate_and_save(&dates).unwrap();

    // 修改作物系数与 ET0 后再次计算
    state.field_api.update_field("DF1B", 1.0, 1).unwrap();
    seed_weather(&state, &[("2024-06-01", 6.0)]);
    let second = state.etc_api.calculate_and_save(&dates).unwrap();
    assert!(second.calculated_at >= first.calculated_at);

    let rows = state
        .etc_api
        .history(Some("DF1B"), Some("2024-06-01"))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].etc_value, 6.0);
    assert_eq!(rows[0].calculated_at, second.calculated_at);

    assert_eq!(state.etc_api.history(None, None).unwrap().len(), 2);
}

#[test]
fn test_recalc_is_idempotent_in_values() {
    let (_tmp, _conn, state) = test_helpers::setup_state();
    seed_two_fields(&state);
    seed_weather(&state, &[("2024-06-01", 5.0), ("2024-06-02", 3.0)]);
    let dates = test_helpers::dates(&["2024-06-01", "2024-06-02"]);

    let first = state.etc_api.calculate_and_save(&dates).unwrap();
    let second = state.etc_api.calculate_and_save(&dates).unwrap();

    assert_eq!(first.results, second.results);
    assert_eq!(state.etc_api.history(None, None).unwrap().len(), 4);
}

#[test]
fn test_missing_observation_writes_nothing() {
    let (_tmp, _conn, state) = test_helpers::setup_state();
    seed_two_fields(&state);
    seed_weather(&state, &[("2024-06-01", 5.0)]);

    let err = recalc_error(state.etc_api.calculate_and_save(&test_helpers::dates(&[
        "2024-06-01",
        "2024-06-02",
        "2024-06-03",
    ])));

    assert_eq!(
        err,
        RecalcError::MissingObservations {
            dates: test_helpers::dates(&["2024-06-02", "2024-06-03"]),
        }
    );
    assert!(err.is_incomplete_data());
    assert!(state.etc_api.history(None, None).unwrap().is_empty());
}

#[test]
fn test_no_fields_is_reported() {
    let (_tmp, _conn, state) = test_helpers::setup_state();
    seed_weather(&state, &[("2024-06-01", 5.0)]);

    let err = recalc_error(
        state
            .etc_api
            .calculate_table(&test_helpers::dates(&["2024-06-01"])),
    );
    assert_eq!(err, RecalcError::NoFields);
}

#[test]
fn test_corrupted_crop_factor_is_excluded() {
    let (_tmp, conn, state) = test_helpers::setup_state();
    seed_two_fields(&state);
    seed_weather(&state, &[("2024-06-01", 5.0)]);
    test_helpers::corrupt_crop_factor(&conn, "SS2B", -2.0);

    let view = state
        .etc_api
        .calculate_table(&test_helpers::dates(&["2024-06-01"]))
        .unwrap();

    assert_eq!(view.outcome.excluded_fields, vec!["SS2B".to_string()]);
    assert!(!view.outcome.results.contains_field("SS2B"));
    assert!(view.table.contains("| DF1B | 4.00 |"));
    assert!(!view.table.contains("SS2B"));
    assert!(state
        .etc_api
        .history(Some("SS2B"), None)
        .unwrap()
        .is_empty());
}

#[test]
fn test_all_fields_invalid_is_reported() {
    let (_tmp, conn, state) = test_helpers::setup_state();
    state.field_api.create_field("DF1B", 0.8, 1).unwrap();
    seed_weather(&state, &[("2024-06-01", 5.0)]);
    test_helpers::corrupt_crop_factor(&conn, "DF1B", -0.5);

    let err = recalc_error(
        state
            .etc_api
            .calculate_and_save(&test_helpers::dates(&["2024-06-01"])),
    );
    assert_eq!(
        err,
        RecalcError::NoValidFields {
            rejected: vec!["DF1B".to_string()],
        }
    );
}

#[test]
fn test_deleted_field_history_is_kept() {
    let (_tmp, _conn, state) = test_helpers::setup_state();
    seed_two_fields(&state);
    seed_weather(&state, &[("2024-06-01", 5.0)]);
    let dates = test_helpers::dates(&["2024-06-01"]);

    state.etc_api.calculate_and_save(&dates).unwrap();
    state.field_api.delete_field("SS2B").unwrap();
    let outcome = state.etc_api.calculate_and_save(&dates).unwrap();

    assert_eq!(outcome.rows_written, 1);
    let ss2b = state.etc_api.history(Some("SS2B"), None).unwrap();
    assert_eq!(ss2b.len(), 1);
    assert_eq!(ss2b[0].etc_value, 2.5);
}

#[test]
fn test_history_newest_first() {
    let (_tmp, _conn, state) = test_helpers::setup_state();
    seed_two_fields(&state);
    seed_weather(&state, &[("2024-06-01", 5.0), ("2024-06-02", 3.0)]);

    state
        .etc_api
        .calculate_and_save(&test_helpers::dates(&["2024-06-01"]))
        .unwrap();
    let latest = state
        .etc_api
        .calculate_and_save(&test_helpers::dates(&["2024-06-02"]))
        .unwrap();

    let history = state.etc_api.history(None, None).unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].calculated_at, latest.calculated_at);
    assert!(history
        .windows(2)
        .all(|pair| pair[0].calculated_at >= pair[1].calculated_at));

    let by_date = state.etc_api.history(None, Some("2024-06-02")).unwrap();
    assert_eq!(by_date.len(), 2);
    assert!(by_date.iter().all(|r| r.date == "2024-06-02"));
}
