// ==========================================
// 场馆排班引擎 - 排班快照仓储接口
// ==========================================
// 职责: 一次性读取某日排班所需的全部只读数据，并回写员工状态
// 红线: 快照应在同一读事务内取得，保证前后一致
// ==========================================

use crate::domain::event::Event;
use crate::domain::rule::{ManningBracket, RatioRule};
use crate::domain::staff::StaffMember;
use crate::domain::types::{AvailabilityStatus, StaffId};
use crate::domain::venue::{Role, Venue};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 某日排班快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffingSnapshot {
    pub venues: Vec<Venue>,
    pub roles: Vec<Role>,
    pub ratio_rules: Vec<RatioRule>,
    pub brackets: Vec<ManningBracket>,
    pub staff: Vec<StaffMember>,
    /// 仅包含目标日期的活动
    pub events: Vec<Event>,
}

#[async_trait]
pub trait StaffRosterRepository: Send + Sync {
    /// 读取目标日期的排班快照
    async fn load_snapshot(&self, date: NaiveDate) -> RepositoryResult<StaffingSnapshot>;

    /// 批量更新员工可用状态
    ///
    /// 未知的员工 ID 返回 NotFound，且不做任何修改
    async fn set_staff_status(
        &self,
        staff_ids: &[StaffId],
        status: AvailabilityStatus,
    ) -> RepositoryResult<()>;
}
