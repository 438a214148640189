// ==========================================
// 场馆排班引擎 - 核心库
// ==========================================
// 系统定位: 纯计算引擎 + 编排端口
// 持久化/HTTP/界面由外部协作方负责
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 存储端口与内存实现
pub mod repository;

// 引擎层 - 需求计算与人员分配
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AssignTier, AvailabilityStatus, EmploymentType};

// 领域实体
pub use domain::{
    AllocationResult, Assignment, Event, ManningBracket, PlanDiagnostic, RatioRule, Requirement,
    Role, Shortage, StaffMember, StaffingPlan, Venue,
};

// 引擎
pub use engine::{
    PlanContext, RequirementCalculator, StaffAllocator, StaffingOrchestrator,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "场馆排班引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
