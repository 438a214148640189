// ==========================================
// 场馆排班引擎 - 排班方案仓储接口
// ==========================================

use crate::domain::plan::StaffingPlan;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait StaffingPlanRepository: Send + Sync {
    /// 保存方案（同一日期只保留最新一份）
    async fn save_plan(&self, plan: &StaffingPlan) -> RepositoryResult<()>;

    /// 查询某日方案
    async fn find_plan_by_date(&self, date: NaiveDate) -> RepositoryResult<Option<StaffingPlan>>;

    /// 删除某日方案（提交失败时回滚用）
    ///
    /// 返回是否确有方案被删除
    async fn delete_plan_by_date(&self, date: NaiveDate) -> RepositoryResult<bool>;
}
