// ==========================================
// 场馆排班引擎 - 排班编排器
// ==========================================
// 用途: 读取快照 → 需求计算 → 人员分配 → 提交方案 → 回写员工状态
// ==========================================
// 红线:
// - 同一日期的生成/重新生成串行执行（进程内按日期加锁）
// - 方案按日期保存；带场馆范围的调用只替换范围内场馆的内容
// - 方案先落库，再把已排员工置为不可用；回写失败则回滚方案
// - 跨进程的串行化由存储层的唯一约束保证
// ==========================================

use crate::config::StaffingConfigReader;
use crate::domain::event::Event;
use crate::domain::plan::{Assignment, PlanDiagnostic, Requirement, StaffingPlan};
use crate::domain::types::{AvailabilityStatus, StaffId, VenueId};
use crate::engine::error::{PlanningError, PlanningResult};
use crate::engine::events::{
    OptionalPlanEventPublisher, PlanEvent, PlanEventPublisher, PlanEventType,
};
use crate::engine::requirement_calculator::RequirementCalculator;
use crate::engine::staff_allocator::StaffAllocator;
use crate::repository::{StaffRosterRepository, StaffingPlanRepository, StaffingSnapshot};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

// ==========================================
// PlanContext - 调用上下文
// ==========================================
// 发起人与场馆范围由调用方显式传入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanContext {
    pub date: NaiveDate,
    /// None 表示全部场馆
    pub venue_scope: Option<Vec<VenueId>>,
    pub requested_by: Option<String>,
}

impl PlanContext {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            venue_scope: None,
            requested_by: None,
        }
    }

    pub fn with_venue_scope(mut self, venues: Vec<VenueId>) -> Self {
        self.venue_scope = Some(venues);
        self
    }

    pub fn requested_by(mut self, user: &str) -> Self {
        self.requested_by = Some(user.to_string());
        self
    }

    pub fn in_scope(&self, venue_id: VenueId) -> bool {
        match &self.venue_scope {
            Some(venues) => venues.contains(&venue_id),
            None => true,
        }
    }

    /// 本次范围是否与已排场馆有交集（全场馆范围视为总有交集）
    pub fn overlaps(&self, planned_venues: &BTreeSet<VenueId>) -> bool {
        match &self.venue_scope {
            Some(venues) => venues.iter().any(|v| planned_venues.contains(v)),
            None => true,
        }
    }

    fn validate(&self) -> PlanningResult<()> {
        if matches!(&self.venue_scope, Some(venues) if venues.is_empty()) {
            return Err(PlanningError::InvalidInput(
                "venue_scope must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ==========================================
// StaffingOrchestrator - 排班编排器
// ==========================================
pub struct StaffingOrchestrator<R, P, C>
where
    R: StaffRosterRepository,
    P: StaffingPlanRepository,
    C: StaffingConfigReader,
{
    roster_repo: Arc<R>,
    plan_repo: Arc<P>,
    config: Arc<C>,
    allocator: StaffAllocator,
    event_publisher: OptionalPlanEventPublisher,
    date_locks: Mutex<HashMap<NaiveDate, Arc<tokio::sync::Mutex<()>>>>,
}

impl<R, P, C> StaffingOrchestrator<R, P, C>
where
    R: StaffRosterRepository,
    P: StaffingPlanRepository,
    C: StaffingConfigReader,
{
    pub fn new(roster_repo: Arc<R>, plan_repo: Arc<P>, config: Arc<C>) -> Self {
        Self {
            roster_repo,
            plan_repo,
            config,
            allocator: StaffAllocator::new(),
            event_publisher: OptionalPlanEventPublisher::none(),
            date_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_event_publisher(mut self, publisher: Arc<dyn PlanEventPublisher>) -> Self {
        self.event_publisher = OptionalPlanEventPublisher::with_publisher(publisher);
        self
    }

    // ==========================================
    // 对外接口
    // ==========================================

    /// 试算方案（不落库，不改员工状态）
    pub async fn preview_plan(&self, ctx: &PlanContext) -> PlanningResult<StaffingPlan> {
        ctx.validate()?;
        let snapshot = self.roster_repo.load_snapshot(ctx.date).await?;
        self.build_plan(ctx, &snapshot).await
    }

    /// 生成并提交某日方案
    ///
    /// 范围内场馆已在该日方案中时返回 PlanAlreadyExists，
    /// 由调用方改走重新生成；
    /// 其他场馆的已有内容原样保留在合并后的方案中
    pub async fn generate_plan(&self, ctx: &PlanContext) -> PlanningResult<StaffingPlan> {
        ctx.validate()?;
        let lock = self.date_lock(ctx.date)?;
        let result = {
            let _guard = lock.lock().await;
            self.generate_locked(ctx).await
        };
        self.release_date_lock(ctx.date, lock);
        result
    }

    /// 重新生成某日方案（仅范围内场馆）
    ///
    /// 旧方案中范围内、且仍处于"已提交"状态的员工
    /// 先视为可用再参与分配；
    /// 新方案不再使用的员工恢复为 AVAILABLE
    pub async fn regenerate_plan(&self, ctx: &PlanContext) -> PlanningResult<StaffingPlan> {
        ctx.validate()?;
        let lock = self.date_lock(ctx.date)?;
        let result = {
            let _guard = lock.lock().await;
            self.regenerate_locked(ctx).await
        };
        self.release_date_lock(ctx.date, lock);
        result
    }

    // ==========================================
    // 内部步骤
    // ==========================================

    async fn generate_locked(&self, ctx: &PlanContext) -> PlanningResult<StaffingPlan> {
        let prior = self.plan_repo.find_plan_by_date(ctx.date).await?;
        if let Some(prior) = &prior {
            if ctx.overlaps(&prior.planned_venues) {
                return Err(PlanningError::PlanAlreadyExists { date: ctx.date });
            }
        }

        info!(
            date = %ctx.date,
            requested_by = ?ctx.requested_by,
            venue_scope = ?ctx.venue_scope,
            "开始生成排班方案"
        );

        let snapshot = self.roster_repo.load_snapshot(ctx.date).await?;
        let fresh = self.build_plan(ctx, &snapshot).await?;
        let to_commit = fresh.assigned_staff_ids();
        let plan = match &prior {
            Some(prior) => fresh.merged_with_prior(prior, |v| ctx.in_scope(v)),
            None => fresh,
        };

        self.commit(&plan, prior.as_ref(), &to_commit, &[]).await?;
        self.publish(&plan, PlanEventType::PlanGenerated);
        Ok(plan)
    }

    async fn regenerate_locked(&self, ctx: &PlanContext) -> PlanningResult<StaffingPlan> {
        let prior = self.plan_repo.find_plan_by_date(ctx.date).await?;
        let committed_status = self.committed_status().await?;
        let mut snapshot = self.roster_repo.load_snapshot(ctx.date).await?;

        info!(
            date = %ctx.date,
            requested_by = ?ctx.requested_by,
            venue_scope = ?ctx.venue_scope,
            has_prior_plan = prior.is_some(),
            "开始重新生成排班方案"
        );

        // 只回收范围内、仍处于已提交状态的旧分配
        // （之后转为请假等状态的人员不动）
        let mut reclaimable: Vec<StaffId> = Vec::new();
        if let Some(prior) = &prior {
            let (in_scope, out_of_scope): (Vec<&Assignment>, Vec<&Assignment>) = prior
                .assignments
                .iter()
                .partition(|a| ctx.in_scope(a.venue_id));
            let kept: BTreeSet<StaffId> = out_of_scope.iter().map(|a| a.staff_id).collect();
            let prior_ids: BTreeSet<StaffId> = in_scope
                .iter()
                .map(|a| a.staff_id)
                .filter(|id| !kept.contains(id))
                .collect();

            for member in snapshot.staff.iter_mut() {
                if prior_ids.contains(&member.id) && member.availability_status == committed_status
                {
                    member.availability_status = AvailabilityStatus::Available;
                    reclaimable.push(member.id);
                }
            }
            debug!(
                prior_plan_id = %prior.plan_id,
                reclaimed_count = reclaimable.len(),
                kept_count = kept.len(),
                "旧方案人员已回收"
            );
        }

        let fresh = self.build_plan(ctx, &snapshot).await?;
        let to_commit = fresh.assigned_staff_ids();
        let plan = match &prior {
            Some(prior) => fresh.merged_with_prior(prior, |v| ctx.in_scope(v)),
            None => fresh,
        };

        self.commit(&plan, prior.as_ref(), &to_commit, &reclaimable).await?;

        let event_type = if prior.is_some() {
            PlanEventType::PlanRegenerated
        } else {
            PlanEventType::PlanGenerated
        };
        self.publish(&plan, event_type);
        Ok(plan)
    }

    /// 快照 → 需求 → 分配 → 方案（仅范围内场馆）
    async fn build_plan(
        &self,
        ctx: &PlanContext,
        snapshot: &StaffingSnapshot,
    ) -> PlanningResult<StaffingPlan> {
        let options = self
            .config
            .get_calculator_options()
            .await
            .map_err(|e| PlanningError::Config(e.to_string()))?;
        let calculator = RequirementCalculator::with_options(options);

        let events: Vec<Event> = snapshot
            .events
            .iter()
            .filter(|e| e.date == ctx.date && ctx.in_scope(e.venue_id))
            .cloned()
            .collect();

        let requirements = calculator.calculate(
            &events,
            &snapshot.venues,
            &snapshot.ratio_rules,
            &snapshot.brackets,
            &snapshot.roles,
        )?;
        let allocation = self.allocator.allocate(&requirements, &snapshot.staff);
        let diagnostic = diagnose(&events, &requirements, snapshot);

        if let Some(diagnostic) = diagnostic {
            info!(date = %ctx.date, diagnostic = %diagnostic, "{}", diagnostic.message());
        }

        let planned_venues: BTreeSet<VenueId> = match &ctx.venue_scope {
            Some(venues) => venues.iter().copied().collect(),
            None => events.iter().map(|e| e.venue_id).collect(),
        };
        let plan = StaffingPlan::new(
            ctx.date,
            ctx.requested_by.clone(),
            requirements,
            allocation,
            diagnostic,
        )
        .with_planned_venues(planned_venues);
        info!(
            plan_id = %plan.plan_id,
            events_count = events.len(),
            total_required = plan.total_required(),
            assignments_count = plan.assignments.len(),
            total_shortage = plan.total_shortage(),
            "排班方案已生成"
        );
        Ok(plan)
    }

    /// 提交方案: 先落库，再回写员工状态
    ///
    /// 状态回写失败时恢复旧方案（无旧方案则删除），
    /// 不留下半提交的日期
    async fn commit(
        &self,
        plan: &StaffingPlan,
        prior: Option<&StaffingPlan>,
        to_commit: &[StaffId],
        reclaimable: &[StaffId],
    ) -> PlanningResult<()> {
        let committed_status = self.committed_status().await?;
        self.plan_repo.save_plan(plan).await?;

        let assigned: BTreeSet<StaffId> = to_commit.iter().copied().collect();
        let released: Vec<StaffId> = reclaimable
            .iter()
            .copied()
            .filter(|id| !assigned.contains(id))
            .collect();
        let assigned: Vec<StaffId> = assigned.into_iter().collect();

        if let Err(e) = self
            .apply_staff_status(&assigned, &released, committed_status)
            .await
        {
            warn!(plan_id = %plan.plan_id, error = %e, "员工状态回写失败，回滚方案");
            self.restore_prior_plan(plan.date, prior).await;
            return Err(e);
        }

        debug!(
            plan_id = %plan.plan_id,
            assigned_count = assigned.len(),
            released_count = released.len(),
            committed_status = %committed_status,
            "排班方案已提交"
        );
        Ok(())
    }

    /// 先释放、再占用；占用失败时把已释放的人员改回已提交状态
    async fn apply_staff_status(
        &self,
        assigned: &[StaffId],
        released: &[StaffId],
        committed_status: AvailabilityStatus,
    ) -> PlanningResult<()> {
        if !released.is_empty() {
            self.roster_repo
                .set_staff_status(released, AvailabilityStatus::Available)
                .await?;
        }
        if assigned.is_empty() {
            return Ok(());
        }
        if let Err(e) = self
            .roster_repo
            .set_staff_status(assigned, committed_status)
            .await
        {
            if !released.is_empty() {
                if let Err(undo) = self
                    .roster_repo
                    .set_staff_status(released, committed_status)
                    .await
                {
                    warn!(error = %undo, released = ?released, "释放人员状态恢复失败");
                }
            }
            return Err(e.into());
        }
        Ok(())
    }

    async fn restore_prior_plan(&self, date: NaiveDate, prior: Option<&StaffingPlan>) {
        let result = match prior {
            Some(prior) => self.plan_repo.save_plan(prior).await,
            None => self.plan_repo.delete_plan_by_date(date).await.map(|_| ()),
        };
        if let Err(e) = result {
            warn!(date = %date, error = %e, "方案回滚失败");
        }
    }

    async fn committed_status(&self) -> PlanningResult<AvailabilityStatus> {
        self.config
            .get_committed_staff_status()
            .await
            .map_err(|e| PlanningError::Config(e.to_string()))
    }

    fn date_lock(&self, date: NaiveDate) -> PlanningResult<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = self
            .date_locks
            .lock()
            .map_err(|e| PlanningError::Config(format!("锁获取失败: {}", e)))?;
        Ok(locks.entry(date).or_default().clone())
    }

    /// 没有其他调用持有该日期锁时移除表项
    fn release_date_lock(&self, date: NaiveDate, lock: Arc<tokio::sync::Mutex<()>>) {
        let Ok(mut locks) = self.date_locks.lock() else {
            return;
        };
        // 表内一份 + 本调用一份
        let idle = locks.get(&date).is_some_and(|entry| Arc::ptr_eq(entry, &lock))
            && Arc::strong_count(&lock) == 2;
        if idle {
            locks.remove(&date);
        }
    }

    /// 发布失败只记录告警，不影响已提交的方案
    fn publish(&self, plan: &StaffingPlan, event_type: PlanEventType) {
        let event = PlanEvent {
            plan_id: plan.plan_id,
            date: plan.date,
            event_type,
            requested_by: plan.requested_by.clone(),
            assignments_count: plan.assignments.len(),
            total_shortage: plan.total_shortage(),
        };
        if let Err(e) = self.event_publisher.publish(event) {
            warn!(plan_id = %plan.plan_id, error = %e, "排班事件发布失败");
        }
    }
}

/// 空需求诊断
fn diagnose(
    events: &[Event],
    requirements: &[Requirement],
    snapshot: &StaffingSnapshot,
) -> Option<PlanDiagnostic> {
    if events.is_empty() {
        return Some(PlanDiagnostic::NoEvents);
    }
    if !requirements.is_empty() {
        return None;
    }
    let configured = events.iter().any(|e| {
        RequirementCalculator::is_configured(e.venue_id, &snapshot.ratio_rules, &snapshot.brackets)
    });
    if configured {
        Some(PlanDiagnostic::RulesProducedNoDemand)
    } else {
        Some(PlanDiagnostic::NoStaffingRules)
    }
}
