// ==========================================
// 场馆排班引擎 - 领域类型定义
// ==========================================
// 职责: 人员可用状态、用工类型、分配层级
// 序列化格式与存储层保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 场馆 ID
pub type VenueId = i64;
/// 岗位 ID
pub type RoleId = i64;
/// 员工 ID
pub type StaffId = i64;
/// 活动 ID
pub type EventId = i64;

// ==========================================
// 可用状态 (Availability Status)
// ==========================================
// 红线: 只有 AVAILABLE 的人员才能进入分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    Available, // 可用
    Off,       // 休息
    Leave,     // 请假
    InEvent,   // 已排入活动
}

impl AvailabilityStatus {
    /// 从字符串解析状态（未知值返回 None）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "AVAILABLE" => Some(AvailabilityStatus::Available),
            "OFF" => Some(AvailabilityStatus::Off),
            "LEAVE" => Some(AvailabilityStatus::Leave),
            "IN_EVENT" => Some(AvailabilityStatus::InEvent),
            _ => None,
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "AVAILABLE"),
            AvailabilityStatus::Off => write!(f, "OFF"),
            AvailabilityStatus::Leave => write!(f, "LEAVE"),
            AvailabilityStatus::InEvent => write!(f, "IN_EVENT"),
        }
    }
}

// ==========================================
// 用工类型 (Employment Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    FullTime,  // 全职
    PartTime,  // 兼职
    Casual,    // 临时
    Freelance, // 外包
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmploymentType::FullTime => write!(f, "FULL_TIME"),
            EmploymentType::PartTime => write!(f, "PART_TIME"),
            EmploymentType::Casual => write!(f, "CASUAL"),
            EmploymentType::Freelance => write!(f, "FREELANCE"),
        }
    }
}

// ==========================================
// 分配层级 (Assign Tier)
// ==========================================
// 顺序: HomeBase 优先于 AvailablePool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignTier {
    HomeBase,      // 本场馆人员
    AvailablePool, // 其他可用人员
}

impl AssignTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignTier::HomeBase => "home_base",
            AssignTier::AvailablePool => "available_pool",
        }
    }
}

impl fmt::Display for AssignTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 定额区间重叠策略 (Bracket Overlap Policy)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BracketOverlapPolicy {
    #[default]
    FirstByMin, // 取 guest_min 最小的区间
    Reject,     // 视为配置错误
}

impl BracketOverlapPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "FIRST_BY_MIN" => Some(BracketOverlapPolicy::FirstByMin),
            "REJECT" => Some(BracketOverlapPolicy::Reject),
            _ => None,
        }
    }
}

impl fmt::Display for BracketOverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketOverlapPolicy::FirstByMin => write!(f, "FIRST_BY_MIN"),
            BracketOverlapPolicy::Reject => write!(f, "REJECT"),
        }
    }
}

// ==========================================
// 格式错误配置处理策略 (Malformed Rule Policy)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MalformedRulePolicy {
    #[default]
    Ignore, // 跳过该条配置并告警
    Fail,   // 返回计算错误
}

impl MalformedRulePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "IGNORE" => Some(MalformedRulePolicy::Ignore),
            "FAIL" => Some(MalformedRulePolicy::Fail),
            _ => None,
        }
    }
}

impl fmt::Display for MalformedRulePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRulePolicy::Ignore => write!(f, "IGNORE"),
            MalformedRulePolicy::Fail => write!(f, "FAIL"),
        }
    }
}
