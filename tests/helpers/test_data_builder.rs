// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use venue_staffing_engine::domain::types::{AvailabilityStatus, EventId, VenueId};
use venue_staffing_engine::domain::{
    Event, ManningBracket, RatioRule, Role, StaffMember, Venue,
};
use venue_staffing_engine::repository::StaffingSnapshot;

// ==========================================
// 固定 ID
// ==========================================

pub const VENUE_A: VenueId = 1;
pub const VENUE_B: VenueId = 2;
pub const VENUE_C: VenueId = 3;

pub const WAITER: i64 = 10;
pub const MANAGER: i64 = 20;
pub const BARTENDER: i64 = 30;

pub const FOH: &str = "Front of House";

pub fn plan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

pub fn roles() -> Vec<Role> {
    vec![
        Role::new(WAITER, "Waiter"),
        Role::new(MANAGER, "Manager"),
        Role::new(BARTENDER, "Bartender"),
    ]
}

pub fn venues() -> Vec<Venue> {
    [(VENUE_A, "Venue A"), (VENUE_B, "Venue B"), (VENUE_C, "Venue C")]
        .iter()
        .map(|(id, name)| Venue {
            id: *id,
            name: name.to_string(),
            venue_type: "Banquet".to_string(),
            default_service_style: Some("Plated".to_string()),
        })
        .collect()
}

pub fn event(id: EventId, venue_id: VenueId, guest_count: u32) -> Event {
    Event::new(id, plan_date(), venue_id, guest_count)
}

// ==========================================
// 场馆配置
// ==========================================

/// Venue A: 50-100 位宾客 → Waiter 2, Manager 1
pub fn venue_a_brackets() -> Vec<ManningBracket> {
    vec![ManningBracket::new(VENUE_A, FOH, 50, 100, &[(WAITER, 2), (MANAGER, 1)])]
}

/// Venue B: Waiter 每 10 位宾客 1 人 + Manager 至少 1 人
pub fn venue_b_rules() -> Vec<RatioRule> {
    vec![
        RatioRule::ratio(VENUE_B, FOH, WAITER, 10, 1),
        RatioRule::minimum(VENUE_B, FOH, MANAGER, 1),
    ]
}

// ==========================================
// 人员
// ==========================================

pub fn waiter(id: i64, name: &str, home: VenueId) -> StaffMember {
    StaffMember::new(id, name, WAITER).with_home_base(home)
}

/// Alice(A) / Bob(A) / Charlie(B) / Eve(A, OFF)
pub fn scenario_d_pool() -> Vec<StaffMember> {
    vec![
        waiter(1, "Alice", VENUE_A),
        waiter(2, "Bob", VENUE_A),
        waiter(3, "Charlie", VENUE_B),
        waiter(4, "Eve", VENUE_A).with_status(AvailabilityStatus::Off),
    ]
}

/// 全量数据: 三个场馆各一场活动 + 一场其他日期的活动
pub fn full_dataset() -> StaffingSnapshot {
    let mut brackets = venue_a_brackets();
    brackets.push(ManningBracket::new(VENUE_A, "Bar", 0, 500, &[(BARTENDER, 1)]));

    let mut events = vec![
        event(100, VENUE_A, 75),
        event(200, VENUE_B, 25),
        event(300, VENUE_C, 40),
    ];
    events.push(Event::new(
        400,
        plan_date().succ_opt().unwrap(),
        VENUE_A,
        60,
    ));

    StaffingSnapshot {
        venues: venues(),
        roles: roles(),
        ratio_rules: venue_b_rules(),
        brackets,
        staff: vec![
            waiter(1, "Alice", VENUE_A),
            waiter(2, "Bob", VENUE_A),
            waiter(3, "Charlie", VENUE_B),
            StaffMember::new(5, "Mona", MANAGER).with_home_base(VENUE_B),
            StaffMember::new(6, "Max", MANAGER).with_home_base(VENUE_A),
            StaffMember::new(7, "Bea", BARTENDER)
                .with_home_base(VENUE_A)
                .with_secondary_roles(&[WAITER]),
            waiter(8, "Wes", VENUE_C).with_status(AvailabilityStatus::Leave),
        ],
        events,
    }
}
