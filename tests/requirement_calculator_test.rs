// ==========================================
// RequirementCalculator 引擎集成测试
// ==========================================
// 测试目标: 验证需求计算逻辑
// 覆盖范围: 定额区间优先、比例规则、无配置场馆、活动间不合并
// ==========================================

mod helpers;

use helpers::test_data_builder::*;
use venue_staffing_engine::domain::{ManningBracket, RatioRule, Requirement};
use venue_staffing_engine::engine::RequirementCalculator;

fn role_counts(requirements: &[Requirement]) -> Vec<(String, u32)> {
    requirements
        .iter()
        .map(|r| (r.role_name.clone(), r.count))
        .collect()
}

fn pair(name: &str, count: u32) -> (String, u32) {
    (name.to_string(), count)
}

// ==========================================
// 端到端场景
// ==========================================

#[test]
fn test_scenario_a_bracket_match() {
    let calculator = RequirementCalculator::new();
    let result = calculator
        .calculate(
            &[event(100, VENUE_A, 75)],
            &venues(),
            &[],
            &venue_a_brackets(),
            &roles(),
        )
        .unwrap();

    assert_eq!(role_counts(&result), vec![pair("Waiter", 2), pair("Manager", 1)]);
    assert!(result.iter().all(|r| r.venue_id == VENUE_A && r.event_id == 100));
    assert!(result[0].reasoning[0].contains("50-100"));
}

#[test]
fn test_scenario_b_ratio_and_minimum() {
    let calculator = RequirementCalculator::new();
    let result = calculator
        .calculate(
            &[event(200, VENUE_B, 25)],
            &venues(),
            &venue_b_rules(),
            &[],
            &roles(),
        )
        .unwrap();

    assert_eq!(role_counts(&result), vec![pair("Waiter", 3), pair("Manager", 1)]);
}

#[test]
fn test_scenario_c_unconfigured_venue() {
    let calculator = RequirementCalculator::new();
    for guests in [0, 1, 75, 10_000] {
        let result = calculator
            .calculate(
                &[event(300, VENUE_C, guests)],
                &venues(),
                &venue_b_rules(),
                &venue_a_brackets(),
                &roles(),
            )
            .unwrap();
        assert!(result.is_empty(), "guests={} should yield nothing", guests);
    }
}

// ==========================================
// 性质测试
// ==========================================

#[test]
fn test_pure_minimum_ignores_guest_count() {
    let rules = vec![RatioRule::minimum(VENUE_B, FOH, MANAGER, 1)];
    let calculator = RequirementCalculator::new();
    for guests in [0, 7, 250, 5_000] {
        let result = calculator
            .calculate(&[event(1, VENUE_B, guests)], &venues(), &rules, &[], &roles())
            .unwrap();
        assert_eq!(role_counts(&result), vec![pair("Manager", 1)]);
    }
}

#[test]
fn test_ratio_ceiling_across_boundaries() {
    let rules = vec![RatioRule::ratio(VENUE_B, FOH, WAITER, 10, 1)];
    let calculator = RequirementCalculator::new();
    for (guests, expected) in [(1, 1), (10, 1), (11, 2), (25, 3), (30, 3), (31, 4)] {
        let result = calculator
            .calculate(&[event(1, VENUE_B, guests)], &venues(), &rules, &[], &roles())
            .unwrap();
        assert_eq!(result[0].count, expected, "guests={}", guests);
    }
}

#[test]
fn test_bracket_counts_match_exactly_and_skip_zero() {
    let brackets = vec![
        ManningBracket::new(VENUE_A, FOH, 0, 49, &[(WAITER, 1), (MANAGER, 0)]),
        ManningBracket::new(VENUE_A, FOH, 50, 100, &[(WAITER, 2), (MANAGER, 1), (BARTENDER, 0)]),
        ManningBracket::new(VENUE_A, FOH, 101, 300, &[(WAITER, 6), (MANAGER, 2), (BARTENDER, 2)]),
    ];
    let calculator = RequirementCalculator::new();

    let small = calculator
        .calculate(&[event(1, VENUE_A, 49)], &venues(), &[], &brackets, &roles())
        .unwrap();
    assert_eq!(role_counts(&small), vec![pair("Waiter", 1)]);

    let large = calculator
        .calculate(&[event(1, VENUE_A, 101)], &venues(), &[], &brackets, &roles())
        .unwrap();
    assert_eq!(
        role_counts(&large),
        vec![pair("Waiter", 6), pair("Manager", 2), pair("Bartender", 2)]
    );

    // 超出所有区间且无比例规则 → 无需求
    let beyond = calculator
        .calculate(&[event(1, VENUE_A, 301)], &venues(), &[], &brackets, &roles())
        .unwrap();
    assert!(beyond.is_empty());
}

#[test]
fn test_events_sharing_venue_are_not_merged() {
    let calculator = RequirementCalculator::new();
    let result = calculator
        .calculate(
            &[event(1, VENUE_B, 25), event(2, VENUE_B, 25)],
            &venues(),
            &venue_b_rules(),
            &[],
            &roles(),
        )
        .unwrap();

    assert_eq!(result.len(), 4);
    let event_ids: Vec<i64> = result.iter().map(|r| r.event_id).collect();
    assert_eq!(event_ids, vec![1, 1, 2, 2]);
}

#[test]
fn test_mixed_events_keep_input_order() {
    let calculator = RequirementCalculator::new();
    let result = calculator
        .calculate(
            &[event(200, VENUE_B, 25), event(300, VENUE_C, 40), event(100, VENUE_A, 75)],
            &venues(),
            &venue_b_rules(),
            &venue_a_brackets(),
            &roles(),
        )
        .unwrap();

    let venues_in_order: Vec<i64> = result.iter().map(|r| r.venue_id).collect();
    assert_eq!(venues_in_order, vec![VENUE_B, VENUE_B, VENUE_A, VENUE_A]);
    assert!(result.iter().all(|r| r.count > 0));
}

#[test]
fn test_calculation_is_repeatable() {
    let calculator = RequirementCalculator::new();
    let events = [event(100, VENUE_A, 75), event(200, VENUE_B, 25)];
    let first = calculator
        .calculate(&events, &venues(), &venue_b_rules(), &venue_a_brackets(), &roles())
        .unwrap();
    let second = calculator
        .calculate(&events, &venues(), &venue_b_rules(), &venue_a_brackets(), &roles())
        .unwrap();
    assert_eq!(first, second);
}
