// ==========================================
// 场馆排班引擎 - 人员分配引擎
// ==========================================
// 输入: 需求列表（顺序即优先级）+ 人员快照
// 输出: Assignment 列表 + Shortage 列表
// ==========================================
// 规则:
// 1) 候选: 可用 + 主岗/副岗匹配 + 本次调用内未被消耗
// 2) 先本场馆人员，后其他人员，层内保持池的原始顺序
// 3) 不足部分记为缺口；不生成外包占位
// 红线: 纯函数，同样输入同样输出；单次调用内不重复排人
// ==========================================

use crate::domain::plan::{AllocationResult, Assignment, Requirement, Shortage};
use crate::domain::staff::StaffMember;
use crate::engine::staff_pool::StaffPool;
use tracing::{debug, info, instrument};

// ==========================================
// StaffAllocator - 人员分配引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaffAllocator {
    // 无状态引擎
}

impl StaffAllocator {
    pub fn new() -> Self {
        Self {}
    }

    /// 按需求顺序贪心分配人员
    ///
    /// # 参数
    /// - `requirements`: 需求列表（越靠前越先满足）
    /// - `staff_pool`: 人员快照（不会被修改）
    ///
    /// # 返回
    /// 分配结果；空需求或空人员池都是合法输入
    #[instrument(skip_all, fields(
        requirements_count = requirements.len(),
        staff_count = staff_pool.len()
    ))]
    pub fn allocate(
        &self,
        requirements: &[Requirement],
        staff_pool: &[StaffMember],
    ) -> AllocationResult {
        let mut pool = StaffPool::new(staff_pool);
        let mut result = AllocationResult::default();

        for requirement in requirements {
            let candidates = pool.candidates(requirement.role_id, requirement.venue_id);
            let mut assigned: u32 = 0;

            for candidate in candidates {
                if assigned >= requirement.count {
                    break;
                }
                let Some(member) = pool.get(candidate.index) else {
                    continue;
                };
                if !pool.consume(member.id) {
                    continue;
                }
                result.assignments.push(Assignment {
                    event_id: requirement.event_id,
                    venue_id: requirement.venue_id,
                    role_id: requirement.role_id,
                    staff_id: member.id,
                    staff_name: member.full_name.clone(),
                    is_freelance: false,
                    reason: candidate.tier,
                });
                assigned += 1;
            }

            let missing = requirement.count.saturating_sub(assigned);
            if missing > 0 {
                result.shortages.push(Shortage {
                    event_id: requirement.event_id,
                    venue_id: requirement.venue_id,
                    role_id: requirement.role_id,
                    role_name: requirement.role_name.clone(),
                    count: missing,
                });
            }

            debug!(
                event_id = requirement.event_id,
                venue_id = requirement.venue_id,
                role = %requirement.role_name,
                required = requirement.count,
                assigned,
                missing,
                "需求分配完成"
            );
        }

        info!(
            assignments_count = result.assignments.len(),
            shortages_count = result.shortages.len(),
            total_shortage = result.total_shortage(),
            "人员分配完成"
        );
        result
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AssignTier, AvailabilityStatus, StaffId};

    fn requirement(event_id: i64, venue_id: i64, role_id: i64, count: u32) -> Requirement {
        Requirement {
            event_id,
            venue_id,
            department: "FOH".to_string(),
            role_id,
            role_name: format!("Role {}", role_id),
            count,
            reasoning: Vec::new(),
        }
    }

    fn assigned_ids(result: &AllocationResult) -> Vec<StaffId> {
        result.assignments.iter().map(|a| a.staff_id).collect()
    }

    #[test]
    fn test_home_base_preferred_over_earlier_pool_entry() {
        let staff = vec![
            StaffMember::new(1, "Far", 10).with_home_base(9),
            StaffMember::new(2, "Near", 10).with_home_base(1),
        ];
        let result = StaffAllocator::new().allocate(&[requirement(1, 1, 10, 1)], &staff);
        assert_eq!(assigned_ids(&result), vec![2]);
        assert_eq!(result.assignments[0].reason, AssignTier::HomeBase);
        assert!(result.shortages.is_empty());
    }

    #[test]
    fn test_secondary_role_matches_in_tier_two() {
        let staff = vec![StaffMember::new(1, "Flex", 20).with_secondary_roles(&[10])];
        let result = StaffAllocator::new().allocate(&[requirement(1, 1, 10, 1)], &staff);
        assert_eq!(assigned_ids(&result), vec![1]);
        assert_eq!(result.assignments[0].reason, AssignTier::AvailablePool);
        assert!(!result.assignments[0].is_freelance);
    }

    #[test]
    fn test_unavailable_staff_never_assigned() {
        let staff = vec![
            StaffMember::new(1, "Off", 10).with_status(AvailabilityStatus::Off),
            StaffMember::new(2, "Leave", 10).with_status(AvailabilityStatus::Leave),
            StaffMember::new(3, "Busy", 10).with_status(AvailabilityStatus::InEvent),
        ];
        let result = StaffAllocator::new().allocate(&[requirement(1, 1, 10, 2)], &staff);
        assert!(result.assignments.is_empty());
        assert_eq!(result.shortages.len(), 1);
        assert_eq!(result.shortages[0].count, 2);
    }

    #[test]
    fn test_empty_inputs_are_valid() {
        let allocator = StaffAllocator::new();
        let empty = allocator.allocate(&[], &[StaffMember::new(1, "Idle", 10)]);
        assert_eq!(empty, AllocationResult::default());

        let all_short = allocator.allocate(&[requirement(1, 1, 10, 3)], &[]);
        assert!(all_short.assignments.is_empty());
        assert_eq!(all_short.total_shortage(), 3);
    }

    #[test]
    fn test_zero_count_requirement_has_no_shortage() {
        let staff = vec![StaffMember::new(1, "Idle", 10)];
        let result = StaffAllocator::new().allocate(&[requirement(1, 1, 10, 0)], &staff);
        assert!(result.assignments.is_empty());
        assert!(result.shortages.is_empty());
    }

    #[test]
    fn test_consumed_staff_not_reused_across_roles() {
        // Bob 可做两个岗位，但只能被排一次
        let staff = vec![StaffMember::new(1, "Bob", 10).with_secondary_roles(&[20])];
        let result = StaffAllocator::new().allocate(
            &[requirement(1, 1, 10, 1), requirement(1, 1, 20, 1)],
            &staff,
        );
        assert_eq!(assigned_ids(&result), vec![1]);
        assert_eq!(result.shortages.len(), 1);
        assert_eq!(result.shortages[0].role_id, 20);
    }
}
