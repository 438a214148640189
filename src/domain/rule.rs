// ==========================================
// 场馆排班引擎 - 人力配置规则
// ==========================================
// 两类配置:
// - RatioRule: 每 M 位宾客配 N 名员工，可带下限/上限/阈值增量
// - ManningBracket: 宾客区间 → 岗位定额表，命中时覆盖比例计算
// ==========================================
// 红线: 领域层只做结构校验，不做需求计算
// ==========================================

use crate::domain::types::{RoleId, VenueId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ==========================================
// RatioRule - 比例规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioRule {
    pub venue_id: VenueId,
    pub department: String,
    pub role_id: RoleId,
    /// 0 表示纯下限规则（只取 min_required）
    pub ratio_guests: u32,
    pub ratio_staff: u32,
    pub threshold_guests: Option<u32>,
    pub threshold_staff: Option<u32>,
    pub min_required: u32,
    pub max_allowed: Option<u32>,
}

impl RatioRule {
    /// 比例规则: 每 ratio_guests 位宾客配 ratio_staff 名员工
    pub fn ratio(
        venue_id: VenueId,
        department: &str,
        role_id: RoleId,
        ratio_guests: u32,
        ratio_staff: u32,
    ) -> Self {
        Self {
            venue_id,
            department: department.to_string(),
            role_id,
            ratio_guests,
            ratio_staff,
            threshold_guests: None,
            threshold_staff: None,
            min_required: 0,
            max_allowed: None,
        }
    }

    /// 纯下限规则: 无论宾客数多少都需要 min_required 人
    pub fn minimum(
        venue_id: VenueId,
        department: &str,
        role_id: RoleId,
        min_required: u32,
    ) -> Self {
        Self {
            min_required,
            ..Self::ratio(venue_id, department, role_id, 0, 0)
        }
    }

    pub fn with_threshold(mut self, threshold_guests: u32, threshold_staff: u32) -> Self {
        self.threshold_guests = Some(threshold_guests);
        self.threshold_staff = Some(threshold_staff);
        self
    }

    pub fn with_bounds(mut self, min_required: u32, max_allowed: Option<u32>) -> Self {
        self.min_required = min_required;
        self.max_allowed = max_allowed;
        self
    }

    /// 结构校验
    ///
    /// # 返回
    /// - Ok(()): 规则可用
    /// - Err(message): 规则格式错误
    pub fn validate(&self) -> Result<(), String> {
        if let Some(max) = self.max_allowed {
            if max < self.min_required {
                return Err(format!(
                    "max_allowed ({}) < min_required ({})",
                    max, self.min_required
                ));
            }
        }
        match (self.threshold_guests, self.threshold_staff) {
            (Some(_), None) => Err("threshold_guests set without threshold_staff".to_string()),
            (None, Some(_)) => Err("threshold_staff set without threshold_guests".to_string()),
            _ => Ok(()),
        }
    }
}

// ==========================================
// ManningBracket - 定额区间
// ==========================================
// counts 保留存储层的 JSON 原文（role_id → 人数），按需解析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManningBracket {
    pub venue_id: VenueId,
    pub department: String,
    pub guest_min: u32,
    /// 闭区间上限
    pub guest_max: u32,
    pub counts: Value,
}

/// 定额表中的单个岗位人数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketCount {
    pub role_id: RoleId,
    pub count: u32,
}

/// 两个定额区间重叠
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketOverlap {
    pub venue_id: VenueId,
    pub department: String,
    pub first: (u32, u32),
    pub second: (u32, u32),
}

impl ManningBracket {
    /// 由 (role_id, count) 列表构造，保留声明顺序
    pub fn new(
        venue_id: VenueId,
        department: &str,
        guest_min: u32,
        guest_max: u32,
        counts: &[(RoleId, u32)],
    ) -> Self {
        let mut map = Map::new();
        for (role_id, count) in counts {
            map.insert(role_id.to_string(), Value::from(*count));
        }
        Self {
            venue_id,
            department: department.to_string(),
            guest_min,
            guest_max,
            counts: Value::Object(map),
        }
    }

    /// 由存储层的 JSON 原文构造（不在此处校验 JSON 内容）
    pub fn from_counts_json(
        venue_id: VenueId,
        department: &str,
        guest_min: u32,
        guest_max: u32,
        counts_json: &str,
    ) -> Result<Self, String> {
        let counts: Value = serde_json::from_str(counts_json)
            .map_err(|e| format!("counts is not valid JSON: {}", e))?;
        Ok(Self {
            venue_id,
            department: department.to_string(),
            guest_min,
            guest_max,
            counts,
        })
    }

    /// 宾客数是否落在闭区间 [guest_min, guest_max] 内
    pub fn contains(&self, guest_count: u32) -> bool {
        self.guest_min <= guest_count && guest_count <= self.guest_max
    }

    pub fn range_label(&self) -> String {
        format!("{}-{}", self.guest_min, self.guest_max)
    }

    /// 解析定额表
    ///
    /// 允许的值: 非负整数，或可解析为非负整数的字符串
    pub fn parse_counts(&self) -> Result<Vec<BracketCount>, String> {
        if self.guest_min > self.guest_max {
            return Err(format!(
                "guest_min ({}) > guest_max ({})",
                self.guest_min, self.guest_max
            ));
        }

        let map = self
            .counts
            .as_object()
            .ok_or_else(|| format!("counts must be an object, got {}", self.counts))?;

        let mut parsed = Vec::with_capacity(map.len());
        for (key, value) in map {
            let role_id = key
                .trim()
                .parse::<RoleId>()
                .map_err(|_| format!("role key '{}' is not a role id", key))?;
            let count = match value {
                Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
                Value::String(s) => s.trim().parse::<u32>().ok(),
                _ => None,
            }
            .ok_or_else(|| {
                format!(
                    "count for role {} is not a non-negative integer: {}",
                    role_id, value
                )
            })?;
            parsed.push(BracketCount { role_id, count });
        }
        Ok(parsed)
    }

    /// 查找同一 (venue_id, department) 下所有重叠的区间对
    ///
    /// 供写入路径在落库前拒绝重叠配置
    pub fn find_overlaps(brackets: &[ManningBracket]) -> Vec<BracketOverlap> {
        let mut overlaps = Vec::new();
        for (i, a) in brackets.iter().enumerate() {
            for b in brackets.iter().skip(i + 1) {
                if a.venue_id != b.venue_id || a.department != b.department {
                    continue;
                }
                if a.guest_min <= b.guest_max && b.guest_min <= a.guest_max {
                    let a_first = (a.guest_min, a.guest_max) <= (b.guest_min, b.guest_max);
                    let (first, second) = if a_first {
                        (a, b)
                    } else {
                        (b, a)
                    };
                    overlaps.push(BracketOverlap {
                        venue_id: a.venue_id,
                        department: a.department.clone(),
                        first: (first.guest_min, first.guest_max),
                        second: (second.guest_min, second.guest_max),
                    });
                }
            }
        }
        overlaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_contains_is_inclusive() {
        let bracket = ManningBracket::new(1, "FOH", 50, 100, &[(1, 2)]);
        assert!(bracket.contains(50));
        assert!(bracket.contains(100));
        assert!(!bracket.contains(49));
        assert!(!bracket.contains(101));
        assert_eq!(bracket.range_label(), "50-100");
    }

    #[test]
    fn test_parse_counts_keeps_declared_order() {
        let bracket = ManningBracket::new(1, "FOH", 0, 10, &[(7, 2), (3, 1), (5, 0)]);
        let counts = bracket.parse_counts().unwrap();
        let ids: Vec<RoleId> = counts.iter().map(|c| c.role_id).collect();
        assert_eq!(ids, vec![7, 3, 5]);
        assert_eq!(counts[2].count, 0);
    }

    #[test]
    fn test_parse_counts_accepts_numeric_strings() {
        let bracket = ManningBracket::from_counts_json(1, "FOH", 0, 10, r#"{"1": "3"}"#).unwrap();
        assert_eq!(bracket.parse_counts().unwrap(), vec![BracketCount { role_id: 1, count: 3 }]);
    }

    #[test]
    fn test_parse_counts_rejects_malformed_payloads() {
        let not_object = ManningBracket::from_counts_json(1, "FOH", 0, 10, "[1, 2]").unwrap();
        assert!(not_object.parse_counts().is_err());

        let bad_key =
            ManningBracket::from_counts_json(1, "FOH", 0, 10, r#"{"waiter": 2}"#).unwrap();
        assert!(bad_key.parse_counts().is_err());

        let negative = ManningBracket::from_counts_json(1, "FOH", 0, 10, r#"{"1": -2}"#).unwrap();
        assert!(negative.parse_counts().is_err());

        let text = ManningBracket::from_counts_json(1, "FOH", 0, 10, r#"{"1": "two"}"#).unwrap();
        assert!(text.parse_counts().is_err());

        assert!(ManningBracket::from_counts_json(1, "FOH", 0, 10, "{oops").is_err());
    }

    #[test]
    fn test_inverted_range_is_malformed() {
        let bracket = ManningBracket::new(1, "FOH", 100, 50, &[(1, 2)]);
        assert!(bracket.parse_counts().is_err());
    }

    #[test]
    fn test_find_overlaps_per_department() {
        let brackets = vec![
            ManningBracket::new(1, "FOH", 50, 100, &[(1, 2)]),
            ManningBracket::new(1, "FOH", 0, 49, &[(1, 1)]),
            ManningBracket::new(1, "FOH", 90, 150, &[(1, 3)]),
            // 不同部门不算重叠
            ManningBracket::new(1, "BOH", 60, 80, &[(2, 1)]),
            // 不同场馆不算重叠
            ManningBracket::new(2, "FOH", 60, 80, &[(1, 1)]),
        ];
        let overlaps = ManningBracket::find_overlaps(&brackets);
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].first, (50, 100));
        assert_eq!(overlaps[0].second, (90, 150));
    }

    #[test]
    fn test_ratio_rule_validation() {
        assert!(RatioRule::ratio(1, "FOH", 1, 10, 1).validate().is_ok());
        assert!(RatioRule::ratio(1, "FOH", 1, 10, 1)
            .with_bounds(3, Some(2))
            .validate()
            .is_err());

        let mut half_threshold = RatioRule::ratio(1, "FOH", 1, 10, 1);
        half_threshold.threshold_guests = Some(100);
        assert!(half_threshold.validate().is_err());
    }
}
