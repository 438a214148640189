// ==========================================
// 场馆排班引擎 - 内存仓储实现
// ==========================================
// 用途: 单元/集成测试、无数据库的嵌入式使用
// 方案以 JSON 文本存放，与关系库实现的存储口径一致
// ==========================================

use crate::domain::plan::StaffingPlan;
use crate::domain::types::{AvailabilityStatus, StaffId};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::plan_repo::StaffingPlanRepository;
use crate::repository::roster_repo::{StaffRosterRepository, StaffingSnapshot};
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct StoreState {
    /// 全量数据（events 含所有日期）
    data: StaffingSnapshot,
    plans: BTreeMap<NaiveDate, String>,
}

#[derive(Debug, Default)]
pub struct InMemoryStaffingStore {
    state: RwLock<StoreState>,
}

impl InMemoryStaffingStore {
    /// 以全量数据初始化（events 可跨多个日期）
    pub fn new(data: StaffingSnapshot) -> Self {
        Self {
            state: RwLock::new(StoreState {
                data,
                plans: BTreeMap::new(),
            }),
        }
    }

    /// 查询员工当前状态
    pub fn staff_status(&self, staff_id: StaffId) -> RepositoryResult<Option<AvailabilityStatus>> {
        let state = self
            .state
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(state
            .data
            .staff
            .iter()
            .find(|s| s.id == staff_id)
            .map(|s| s.availability_status))
    }

    /// 已保存的方案数量
    pub fn plan_count(&self) -> RepositoryResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(state.plans.len())
    }
}

#[async_trait]
impl StaffRosterRepository for InMemoryStaffingStore {
    async fn load_snapshot(&self, date: NaiveDate) -> RepositoryResult<StaffingSnapshot> {
        let state = self
            .state
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut snapshot = state.data.clone();
        snapshot.events.retain(|e| e.date == date);
        Ok(snapshot)
    }

    async fn set_staff_status(
        &self,
        staff_ids: &[StaffId],
        status: AvailabilityStatus,
    ) -> RepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        // 先整体校验，避免部分更新
        if let Some(missing) = staff_ids
            .iter()
            .find(|id| !state.data.staff.iter().any(|s| s.id == **id))
        {
            return Err(RepositoryError::NotFound {
                entity: "StaffMember".to_string(),
                id: missing.to_string(),
            });
        }

        for member in state
            .data
            .staff
            .iter_mut()
            .filter(|s| staff_ids.contains(&s.id))
        {
            member.availability_status = status;
        }
        Ok(())
    }
}

#[async_trait]
impl StaffingPlanRepository for InMemoryStaffingStore {
    async fn save_plan(&self, plan: &StaffingPlan) -> RepositoryResult<()> {
        let blob = plan.to_json_blob()?;
        let mut state = self
            .state
            .write()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        state.plans.insert(plan.date, blob);
        Ok(())
    }

    async fn find_plan_by_date(&self, date: NaiveDate) -> RepositoryResult<Option<StaffingPlan>> {
        let state = self
            .state
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        match state.plans.get(&date) {
            Some(blob) => {
                let plan = StaffingPlan::from_json_blob(blob)
                    .with_context(|| format!("{} 的排班方案无法解析", date))?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    async fn delete_plan_by_date(&self, date: NaiveDate) -> RepositoryResult<bool> {
        let mut state = self
            .state
            .write()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(state.plans.remove(&date).is_some())
    }
}
