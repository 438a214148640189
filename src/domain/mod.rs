// ==========================================
// 场馆排班引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod event;
pub mod plan;
pub mod rule;
pub mod staff;
pub mod types;
pub mod venue;

// 重导出核心类型
pub use event::Event;
pub use plan::{AllocationResult, Assignment, PlanDiagnostic, Requirement, Shortage, StaffingPlan};
pub use rule::{BracketCount, BracketOverlap, ManningBracket, RatioRule};
pub use staff::StaffMember;
pub use types::{
    AssignTier, AvailabilityStatus, BracketOverlapPolicy, EmploymentType, EventId,
    MalformedRulePolicy, RoleId, StaffId, VenueId,
};
pub use venue::{Role, Venue};
