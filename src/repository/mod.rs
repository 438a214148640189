// ==========================================
// 场馆排班引擎 - 数据仓储层
// ==========================================
// 职责: 定义编排层依赖的存储端口
// 红线: 引擎不直接访问存储；关系库实现由外部提供
// ==========================================

pub mod error;
pub mod memory;
pub mod plan_repo;
pub mod roster_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use memory::InMemoryStaffingStore;
pub use plan_repo::StaffingPlanRepository;
pub use roster_repo::{StaffRosterRepository, StaffingSnapshot};
