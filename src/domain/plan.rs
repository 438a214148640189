// ==========================================
// 场馆排班引擎 - 排班结果
// ==========================================
// Requirement / Assignment / Shortage 每次调用新建，
// 不带持久身份；落库时由编排层赋予 ID
// ==========================================

use crate::domain::types::{AssignTier, EventId, RoleId, StaffId, VenueId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// 人力需求（RequirementCalculator 输出）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub event_id: EventId,
    pub venue_id: VenueId,
    pub department: String,
    pub role_id: RoleId,
    pub role_name: String,
    pub count: u32,
    /// 计算依据（按顺序，可审计）
    pub reasoning: Vec<String>,
}

/// 人员分配（StaffAllocator 输出）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub event_id: EventId,
    pub venue_id: VenueId,
    pub role_id: RoleId,
    pub staff_id: StaffId,
    pub staff_name: String,
    /// 引擎从不生成外包占位，始终为 false
    pub is_freelance: bool,
    pub reason: AssignTier,
}

/// 缺口（需求未被满足的人数，始终 > 0）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortage {
    pub event_id: EventId,
    pub venue_id: VenueId,
    pub role_id: RoleId,
    pub role_name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub assignments: Vec<Assignment>,
    pub shortages: Vec<Shortage>,
}

impl AllocationResult {
    pub fn total_shortage(&self) -> u32 {
        self.shortages.iter().map(|s| s.count).sum()
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.shortages.is_empty()
    }
}

// ==========================================
// PlanDiagnostic - 空需求诊断
// ==========================================
// 区分"没有配置规则"与"规则存在但需求为零"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanDiagnostic {
    NoEvents,              // 范围内没有活动
    NoStaffingRules,       // 范围内场馆没有任何规则/定额
    RulesProducedNoDemand, // 规则存在但计算结果全为 0
}

impl PlanDiagnostic {
    /// 面向用户的提示
    pub fn message(&self) -> &'static str {
        match self {
            PlanDiagnostic::NoEvents => "No events scheduled for this date",
            PlanDiagnostic::NoStaffingRules => {
                "No staffing rules configured for the venues of this date"
            }
            PlanDiagnostic::RulesProducedNoDemand => {
                "Staffing rules exist but produced no demand for this date"
            }
        }
    }
}

impl fmt::Display for PlanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanDiagnostic::NoEvents => write!(f, "NO_EVENTS"),
            PlanDiagnostic::NoStaffingRules => write!(f, "NO_STAFFING_RULES"),
            PlanDiagnostic::RulesProducedNoDemand => write!(f, "RULES_PRODUCED_NO_DEMAND"),
        }
    }
}

// ==========================================
// StaffingPlan - 某日排班方案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingPlan {
    pub plan_id: Uuid,
    pub date: NaiveDate,
    pub requested_by: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub requirements: Vec<Requirement>,
    pub assignments: Vec<Assignment>,
    pub shortages: Vec<Shortage>,
    pub diagnostic: Option<PlanDiagnostic>,
    /// 已排过的场馆（同日其他场馆可另行生成）
    #[serde(default)]
    pub planned_venues: BTreeSet<VenueId>,
}

impl StaffingPlan {
    pub fn new(
        date: NaiveDate,
        requested_by: Option<String>,
        requirements: Vec<Requirement>,
        allocation: AllocationResult,
        diagnostic: Option<PlanDiagnostic>,
    ) -> Self {
        Self {
            plan_id: Uuid::new_v4(),
            date,
            requested_by,
            generated_at: Utc::now(),
            requirements,
            assignments: allocation.assignments,
            shortages: allocation.shortages,
            diagnostic,
            planned_venues: BTreeSet::new(),
        }
    }

    pub fn with_planned_venues(mut self, venues: impl IntoIterator<Item = VenueId>) -> Self {
        self.planned_venues = venues.into_iter().collect();
        self
    }

    /// 保留旧方案中范围外场馆的内容（排在本次结果之前）
    ///
    /// 范围内场馆以本次结果为准
    pub fn merged_with_prior(
        mut self,
        prior: &StaffingPlan,
        in_scope: impl Fn(VenueId) -> bool,
    ) -> Self {
        self.requirements = prior
            .requirements
            .iter()
            .filter(|r| !in_scope(r.venue_id))
            .cloned()
            .chain(self.requirements)
            .collect();
        self.assignments = prior
            .assignments
            .iter()
            .filter(|a| !in_scope(a.venue_id))
            .cloned()
            .chain(self.assignments)
            .collect();
        self.shortages = prior
            .shortages
            .iter()
            .filter(|s| !in_scope(s.venue_id))
            .cloned()
            .chain(self.shortages)
            .collect();
        self.planned_venues
            .extend(prior.planned_venues.iter().copied().filter(|v| !in_scope(*v)));
        if !self.requirements.is_empty() {
            self.diagnostic = None;
        }
        self
    }

    pub fn assigned_staff_ids(&self) -> Vec<StaffId> {
        self.assignments.iter().map(|a| a.staff_id).collect()
    }

    pub fn total_required(&self) -> u32 {
        self.requirements.iter().map(|r| r.count).sum()
    }

    pub fn total_shortage(&self) -> u32 {
        self.shortages.iter().map(|s| s.count).sum()
    }

    /// 序列化为存储层使用的 JSON 文本
    pub fn to_json_blob(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json_blob(blob: &str) -> serde_json::Result<Self> {
        serde_json::from_str(blob)
    }
}
