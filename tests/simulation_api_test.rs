// ==========================================
// SimulationApi 集成测试
// ==========================================
// 测试目标: 报表 → 选择 → 模拟 → CO₂ 的完整链路
// 夹具: tests/fixtures/production_mtd.csv
// ==========================================


use clinker_factor_sim::api::{ApiError, Co2Input, FactorSource, SelectionRequest, ValidationMode};
use clinker_factor_sim::domain::{AllocationPolicy, DataType, SimulationMode};
use clinker_factor_sim::engine::EngineError;
use clinker_factor_sim::logging;
use test_helpers::{assert_close, create_fixture_api, jan_mtd, types};

// ==========================================
// 选择与基准
// ==========================================

#[test]
fn test_list_options() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let options = api.list_options().expect("应返回选项");
    assert_eq!(options.months, vec!["Jan", "Feb", "Mar"]);
    assert_eq!(options.periods, vec!["MTD", "YTD"]);
    assert_eq!(options.data_types, vec![DataType::Actual, DataType::Budget]);
}

#[test]
fn test_baseline_actual_and_budget() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let actual = api.get_baseline(&jan_mtd(DataType::Actual)).expect("实际口径应成功");
    assert_eq!(actual.rows.len(), 4);
    assert_close(actual.consolidated_factor, 40500.0 / 55000.0 * 100.0);
    assert_eq!(actual.consolidated_factor_display, "73.64");

    let budget = api.get_baseline(&jan_mtd(DataType::Budget)).expect("预算口径应成功");
    assert_close(budget.consolidated_factor, 38700.0 / 55000.0 * 100.0);
    assert_eq!(budget.consolidated_factor_display, "70.36");
}

#[test]
fn test_baseline_selection_is_idempotent() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let first = api.get_baseline(&jan_mtd(DataType::Actual)).expect("首次选择失败");
    let second = api.get_baseline(&jan_mtd(DataType::Actual)).expect("再次选择失败");
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.consolidated_factor, second.consolidated_factor);
}

#[test]
fn test_baseline_trims_selection_values() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let selection = SelectionRequest::new(" Feb ", "MTD ", DataType::Actual);
    let baseline = api.get_baseline(&selection).expect("应忽略首尾空白");
    assert_close(baseline.consolidated_factor, 30100.0 / 40000.0 * 100.0);
}

#[test]
fn test_empty_selection_is_warning() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let err = api
        .get_baseline(&SelectionRequest::new("Dec", "MTD", DataType::Actual))
        .expect_err("无匹配行应报错");
    assert!(err.is_warning());
    assert!(matches!(err, ApiError::Engine(EngineError::EmptySelection { .. })));
}

#[test]
fn test_zero_production_is_failure() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let err = api
        .get_baseline(&SelectionRequest::new("Mar", "MTD", DataType::Actual))
        .expect_err("产量为 0 应报错");
    assert!(!err.is_warning());
    assert!(matches!(err, ApiError::Engine(EngineError::DivisionHazard(_))));
}

// ==========================================
// 模式 A: 目标综合熟料系数
// ==========================================

#[test]
fn test_simulate_target_hits_target_exactly() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let result = api
        .simulate_target(&jan_mtd(DataType::Actual), Some(70.0), &types(&["PCC", "PPC"]))
        .expect("模拟应成功");

    assert_eq!(result.mode, SimulationMode::TargetConsolidated);
    assert_close(result.consolidated_factor, 70.0);
    assert_eq!(result.consolidated_factor_display, "70.00");
    assert_close(result.baseline_consolidated_factor, 40500.0 / 55000.0 * 100.0);

    let after_types: Vec<&str> = result.after.iter().map(|r| r.cement_type.as_str()).collect();
    assert_eq!(after_types, vec!["PCC", "PPC"]);
    assert_close(result.after[0].clinker_consumption, 19875.0);
    assert_close(result.after[0].clinker_factor, 66.25);
    assert_close(result.after[1].clinker_consumption, 6625.0);

    // 对比表仅含可调品种且产量不变
    assert_eq!(result.before.len(), 2);
    assert_eq!(result.before[0].cement_production, result.after[0].cement_production);

    let allocation = result.allocation.expect("模式 A 应附带分配明细");
    assert_close(allocation.fixed_clinker_sum, 12000.0);
    assert_close(allocation.variable_clinker_total, 26500.0);
    assert!(!allocation.clamped);
}

#[test]
fn test_simulate_target_defaults_to_current_factor() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let result = api
        .simulate_target(&jan_mtd(DataType::Actual), None, &types(&["PCC", "PPC"]))
        .expect("模拟应成功");
    assert_close(result.consolidated_factor, result.baseline_consolidated_factor);
}

#[test]
fn test_simulate_target_requires_two_types() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    for selected in [types(&[]), types(&["OPC"]), types(&["OPC", "OPC"])] {
        let err = api
            .simulate_target(&jan_mtd(DataType::Actual), Some(70.0), &selected)
            .expect_err("可调品种不足应报错");
        assert!(err.is_warning());
        assert!(matches!(
            err,
            ApiError::Engine(EngineError::InsufficientSelection { required: 2, .. })
        ));
    }
}

#[test]
fn test_simulate_target_reports_selection_count_before_target_range() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let err = api
        .simulate_target(&jan_mtd(DataType::Actual), Some(-5.0), &types(&["OPC"]))
        .expect_err("单一品种应报错");
    assert!(matches!(
        err,
        ApiError::Engine(EngineError::InsufficientSelection { selected: 1, required: 2 })
    ));
}

#[test]
fn test_simulate_target_unknown_type_is_warning() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let err = api
        .simulate_target(&jan_mtd(DataType::Actual), Some(70.0), &types(&["OPC", "XYZ"]))
        .expect_err("未知品种应报错");
    assert!(err.is_warning());
}

#[test]
fn test_negative_allocation_policies() {
    logging::init_test();
    let selected = types(&["PPC", "SBC"]);

    // Allow: 负值照常分配，目标仍精确达成
    let allow = create_fixture_api(AllocationPolicy::Allow)
        .simulate_target(&jan_mtd(DataType::Actual), Some(20.0), &selected)
        .expect("Allow 策略应成功");
    assert_close(allow.consolidated_factor, 20.0);
    assert!(allow.after.iter().all(|r| r.clinker_consumption < 0.0));

    // Reject: 警告,不出结果
    let err = create_fixture_api(AllocationPolicy::Reject)
        .simulate_target(&jan_mtd(DataType::Actual), Some(20.0), &selected)
        .expect_err("Reject 策略应报错");
    assert!(err.is_warning());
    assert!(matches!(err, ApiError::Engine(EngineError::NegativeAllocation { .. })));

    // Clamp: 可调品种熟料截断为 0
    let clamp = create_fixture_api(AllocationPolicy::Clamp)
        .simulate_target(&jan_mtd(DataType::Actual), Some(20.0), &selected)
        .expect("Clamp 策略应成功");
    assert!(clamp.after.iter().all(|r| r.clinker_consumption == 0.0));
    assert_close(clamp.consolidated_factor, 30000.0 / 55000.0 * 100.0);
    assert!(clamp.allocation.map(|a| a.clamped).unwrap_or(false));
}

#[test]
fn test_negative_target_rejected_by_validator() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let err = api
        .simulate_target(&jan_mtd(DataType::Actual), Some(-5.0), &types(&["PCC", "PPC"]))
        .expect_err("负目标应报错");
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

// ==========================================
// 模式 B: 分品种熟料系数
// ==========================================

#[test]
fn test_simulate_per_type_sets_factor_exactly() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let result = api
        .simulate_per_type(&jan_mtd(DataType::Actual), &[("OPC".to_string(), Some(80.0))])
        .expect("模拟应成功");

    assert_eq!(result.mode, SimulationMode::PerTypeOverride);
    assert!(result.allocation.is_none());
    assert_eq!(result.after.len(), 1);
    assert_eq!(result.after[0].clinker_factor, 80.0);
    assert_close(result.after[0].clinker_consumption, 8000.0);
    assert_close(result.consolidated_factor, 39500.0 / 55000.0 * 100.0);
    assert_eq!(result.consolidated_factor_display, "71.82");
    assert_close(result.consolidated_delta, -1000.0 / 55000.0 * 100.0);
    assert_close(result.clinker_delta, -1000.0);
}

#[test]
fn test_simulate_per_type_missing_value_uses_current_factor() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let result = api
        .simulate_per_type(&jan_mtd(DataType::Actual), &[("PPC".to_string(), None)])
        .expect("模拟应成功");
    assert_close(result.after[0].clinker_consumption, 7500.0);
    assert_close(result.consolidated_factor, result.baseline_consolidated_factor);
}

#[test]
fn test_override_defaults_are_rounded_current_factors() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let defaults = api
        .get_override_defaults(&jan_mtd(DataType::Actual), &types(&["SBC", "PCC"]))
        .expect("应返回默认值");
    assert_eq!(defaults.len(), 2);
    assert_eq!(defaults[0].cement_type, "SBC");
    assert_eq!(defaults[0].clinker_factor, 60.0);
    assert_eq!(defaults[1].clinker_factor, 70.0);
}

#[test]
fn test_simulate_per_type_empty_is_warning() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let err = api
        .simulate_per_type(&jan_mtd(DataType::Actual), &[])
        .expect_err("空覆写应报错");
    assert!(err.is_warning());
    assert!(matches!(err, ApiError::Engine(EngineError::EmptyOverrides)));
}

#[test]
fn test_override_out_of_range_strict_vs_autofix() {
    logging::init_test();
    let overrides = [("OPC".to_string(), Some(120.0))];

    let strict = create_fixture_api(AllocationPolicy::Allow);
    let err = strict
        .simulate_per_type(&jan_mtd(DataType::Actual), &overrides)
        .expect_err("严格模式下越界应报错");
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let autofix = create_fixture_api(AllocationPolicy::Allow).with_validation_mode(ValidationMode::AutoFix);
    let result = autofix
        .simulate_per_type(&jan_mtd(DataType::Actual), &overrides)
        .expect("自动修复模式应成功");
    assert_eq!(result.after[0].clinker_factor, 100.0);
}

// ==========================================
// CO₂ 估算
// ==========================================

#[test]
fn test_co2_manual_reference_values() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let co2 = api
        .estimate_co2(80.0, FactorSource::Manual, &Co2Input::default())
        .expect("估算应成功");
    assert_close(co2.estimate.co2_process, 424.8);
    assert_close(co2.estimate.co2_fuel, 222.700512);
    assert_close(co2.estimate.co2_total, 653.97551712);
    assert_eq!(co2.co2_total_display, "654");
    assert_eq!(co2.factor_source, FactorSource::Manual);
}

#[test]
fn test_co2_from_target_simulation() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let simulation = api
        .simulate_target(&jan_mtd(DataType::Actual), Some(70.0), &types(&["PCC", "PPC"]))
        .expect("模拟应成功");
    let co2 = api
        .estimate_co2_for_simulation(&simulation, &Co2Input::default())
        .expect("估算应成功");

    assert_eq!(co2.factor_source, FactorSource::TargetSimulation);
    assert_close(co2.estimate.co2_total, 653.97551712 * 70.0 / 80.0);
    assert_eq!(co2.co2_total_display, "572");
}

#[test]
fn test_co2_from_baseline_with_overrides() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let input = Co2Input {
        tsr: Some(0.0),
        adjustment_factor: Some(1.0),
        ..Co2Input::default()
    };
    let co2 = api
        .estimate_co2_for_baseline(&jan_mtd(DataType::Actual), &input)
        .expect("估算应成功");

    let ratio = 40500.0 / 55000.0;
    let expected = ratio * 531.0 + 3340.0 * 0.0958 * ratio;
    assert_eq!(co2.factor_source, FactorSource::Baseline);
    assert_close(co2.estimate.co2_total, expected);
}

#[test]
fn test_co2_rejects_tsr_out_of_range() {
    logging::init_test();
    let api = create_fixture_api(AllocationPolicy::Allow);

    let input = Co2Input {
        tsr: Some(150.0),
        ..Co2Input::default()
    };
    let err = api
        .estimate_co2(80.0, FactorSource::Manual, &input)
        .expect_err("TSR 越界应报错");
    assert!(matches!(err, ApiError::InvalidInput(_)));
}
