// ==========================================
// 场馆排班引擎 - 引擎层
// ==========================================
// 职责: 需求计算、人员分配、编排提交
// 红线: 计算与分配是纯函数，不做 I/O；所有结果必须带 reason
// ==========================================

pub mod error;
pub mod events;
pub mod orchestrator;
pub mod requirement_calculator;
pub mod staff_allocator;
pub mod staff_pool;

// 重导出核心引擎
pub use error::{EngineError, EngineResult, PlanningError, PlanningResult};
pub use events::{
    NoOpPlanEventPublisher, OptionalPlanEventPublisher, PlanEvent, PlanEventPublisher,
    PlanEventType,
};
pub use orchestrator::{PlanContext, StaffingOrchestrator};
pub use requirement_calculator::{CalculatorOptions, RequirementCalculator};
pub use staff_allocator::StaffAllocator;
pub use staff_pool::{Candidate, StaffPool};
