// ==========================================
// 场馆排班引擎 - 人员池
// ==========================================
// 人员记录只读（arena），消耗情况记录在独立的 ID 集合中
// 红线: 单次分配内同一员工 ID 最多被消耗一次
// ==========================================

use crate::domain::staff::StaffMember;
use crate::domain::types::{AssignTier, RoleId, StaffId, VenueId};
use std::collections::BTreeSet;

/// 候选人（池内下标 + 层级）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub tier: AssignTier,
}

pub struct StaffPool<'a> {
    staff: &'a [StaffMember],
    consumed: BTreeSet<StaffId>,
}

impl<'a> StaffPool<'a> {
    pub fn new(staff: &'a [StaffMember]) -> Self {
        Self {
            staff,
            consumed: BTreeSet::new(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&'a StaffMember> {
        self.staff.get(index)
    }

    pub fn is_consumed(&self, staff_id: StaffId) -> bool {
        self.consumed.contains(&staff_id)
    }

    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }

    /// 标记已消耗
    ///
    /// # 返回
    /// - true: 首次消耗
    /// - false: 已被消耗过（调用方不得再分配）
    pub fn consume(&mut self, staff_id: StaffId) -> bool {
        self.consumed.insert(staff_id)
    }

    /// 构建候选集合: 可用、未消耗、主岗或副岗匹配
    ///
    /// 先本场馆（HomeBase）后其他（AvailablePool），层内保持池的原始顺序。
    /// 池内重复的员工 ID 只取第一次出现。
    pub fn candidates(&self, role_id: RoleId, venue_id: VenueId) -> Vec<Candidate> {
        let mut seen: BTreeSet<StaffId> = BTreeSet::new();
        let mut home_base = Vec::new();
        let mut available_pool = Vec::new();

        for (index, member) in self.staff.iter().enumerate() {
            if !seen.insert(member.id) {
                continue;
            }
            if self.is_consumed(member.id) || !member.is_available() || !member.can_fill(role_id) {
                continue;
            }
            if member.is_home_base(venue_id) {
                home_base.push(Candidate {
                    index,
                    tier: AssignTier::HomeBase,
                });
            } else {
                available_pool.push(Candidate {
                    index,
                    tier: AssignTier::AvailablePool,
                });
            }
        }

        home_base.extend(available_pool);
        home_base
    }
}
