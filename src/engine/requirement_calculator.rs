// ==========================================
// 场馆排班引擎 - 人力需求计算引擎
// ==========================================
// 输入: 活动列表 + 场馆配置（比例规则 / 定额区间）+ 岗位
// 输出: Requirement 列表（每条带可审计的 reasoning）
// ==========================================
// 规则:
// 1) 定额区间优先: 命中区间时不再看比例规则
// 2) 比例规则兜底: ceil(guests / ratio_guests) * ratio_staff,
//    阈值增量后按 min_required / max_allowed 夹紧
// 3) 无配置: 不产生需求（不是错误）
// 红线: 不同活动的需求永不合并
// ==========================================

use crate::domain::event::Event;
use crate::domain::plan::Requirement;
use crate::domain::rule::{BracketCount, ManningBracket, RatioRule};
use crate::domain::types::{BracketOverlapPolicy, MalformedRulePolicy, VenueId};
use crate::domain::venue::{role_name_of, Role, Venue};
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, info, instrument, warn};

/// 计算选项（来自配置层）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculatorOptions {
    pub overlap_policy: BracketOverlapPolicy,
    pub malformed_policy: MalformedRulePolicy,
}

/// 单个 (场馆, 部门) 上生效的配置
///
/// 定额与比例两种配置互斥，按此联合类型分派
#[derive(Debug)]
enum RuleSet<'a> {
    Bracket {
        bracket: &'a ManningBracket,
        counts: Vec<BracketCount>,
        overlapping: usize,
    },
    Ratio(Vec<&'a RatioRule>),
    Unconfigured,
}

// ==========================================
// RequirementCalculator - 人力需求计算引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RequirementCalculator {
    options: CalculatorOptions,
}

impl RequirementCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CalculatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> CalculatorOptions {
        self.options
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算一组活动的人力需求
    ///
    /// # 参数
    /// - `events`: 活动列表（输出顺序与之一致）
    /// - `venues`: 场馆快照（仅用于诊断日志）
    /// - `rules`: 比例规则
    /// - `brackets`: 定额区间
    /// - `roles`: 岗位（用于填充 role_name）
    ///
    /// # 返回
    /// - Ok(需求列表): 可能为空
    /// - Err: 配置格式错误且策略为 FAIL，或区间重叠且策略为 REJECT
    #[instrument(skip_all, fields(
        events_count = events.len(),
        rules_count = rules.len(),
        brackets_count = brackets.len()
    ))]
    pub fn calculate(
        &self,
        events: &[Event],
        venues: &[Venue],
        rules: &[RatioRule],
        brackets: &[ManningBracket],
        roles: &[Role],
    ) -> EngineResult<Vec<Requirement>> {
        let mut requirements = Vec::new();
        for event in events {
            let event_requirements =
                self.calculate_for_event(event, venues, rules, brackets, roles)?;
            requirements.extend(event_requirements);
        }

        info!(
            requirements_count = requirements.len(),
            total_headcount = requirements.iter().map(|r| r.count as u64).sum::<u64>(),
            "人力需求计算完成"
        );
        Ok(requirements)
    }

    /// 计算单个活动的人力需求
    pub fn calculate_for_event(
        &self,
        event: &Event,
        venues: &[Venue],
        rules: &[RatioRule],
        brackets: &[ManningBracket],
        roles: &[Role],
    ) -> EngineResult<Vec<Requirement>> {
        if !venues.iter().any(|v| v.id == event.venue_id) {
            debug!(
                event_id = event.id,
                venue_id = event.venue_id,
                "场馆不在快照中，按 venue_id 继续查找配置"
            );
        }

        let departments = departments_for_venue(event.venue_id, rules, brackets);
        if departments.is_empty() {
            debug!(
                event_id = event.id,
                venue_id = event.venue_id,
                "场馆无人力配置，跳过"
            );
            return Ok(Vec::new());
        }

        let mut requirements = Vec::new();
        for department in &departments {
            match self.resolve_rule_set(event, department, rules, brackets)? {
                RuleSet::Bracket {
                    bracket,
                    counts,
                    overlapping,
                } => {
                    requirements.extend(
                        self.apply_bracket(event, bracket, &counts, overlapping, roles),
                    );
                }
                RuleSet::Ratio(ratio_rules) => {
                    for rule in ratio_rules {
                        if let Some(requirement) = self.apply_ratio(event, rule, roles)? {
                            requirements.push(requirement);
                        }
                    }
                }
                RuleSet::Unconfigured => {}
            }
        }

        debug!(
            event_id = event.id,
            guest_count = event.guest_count,
            departments = ?departments,
            requirements_count = requirements.len(),
            "活动需求计算完成"
        );
        Ok(requirements)
    }

    /// 场馆是否存在任何比例规则或定额区间
    pub fn is_configured(
        venue_id: VenueId,
        rules: &[RatioRule],
        brackets: &[ManningBracket],
    ) -> bool {
        rules.iter().any(|r| r.venue_id == venue_id)
            || brackets.iter().any(|b| b.venue_id == venue_id)
    }

    // ==========================================
    // 配置解析
    // ==========================================

    /// 选出 (场馆, 部门) 上生效的配置
    fn resolve_rule_set<'a>(
        &self,
        event: &Event,
        department: &str,
        rules: &'a [RatioRule],
        brackets: &'a [ManningBracket],
    ) -> EngineResult<RuleSet<'a>> {
        // 只解析区间包含宾客数的定额；未命中的配置不参与本次计算
        let mut matching: Vec<(&'a ManningBracket, Vec<BracketCount>)> = Vec::new();
        for bracket in brackets.iter().filter(|b| {
            b.venue_id == event.venue_id
                && b.department == department
                && b.contains(event.guest_count)
        }) {
            let counts = match bracket.parse_counts() {
                Ok(counts) => counts,
                Err(message) => {
                    self.on_malformed(EngineError::MalformedBracket {
                        venue_id: bracket.venue_id,
                        department: bracket.department.clone(),
                        message,
                    })?;
                    continue;
                }
            };
            matching.push((bracket, counts));
        }

        // 稳定排序: guest_min 相同时保持输入顺序
        matching.sort_by_key(|(bracket, _)| bracket.guest_min);

        if matching.len() > 1 && self.options.overlap_policy == BracketOverlapPolicy::Reject {
            return Err(EngineError::OverlappingBrackets {
                venue_id: event.venue_id,
                department: department.to_string(),
                guest_count: event.guest_count,
                first: matching[0].0.range_label(),
                second: matching[1].0.range_label(),
            });
        }

        let overlapping = matching.len();
        if let Some((bracket, counts)) = matching.into_iter().next() {
            return Ok(RuleSet::Bracket {
                bracket,
                counts,
                overlapping,
            });
        }

        let ratio_rules: Vec<&'a RatioRule> = rules
            .iter()
            .filter(|r| r.venue_id == event.venue_id && r.department == department)
            .collect();
        if ratio_rules.is_empty() {
            Ok(RuleSet::Unconfigured)
        } else {
            Ok(RuleSet::Ratio(ratio_rules))
        }
    }

    /// 按策略处理格式错误的配置
    fn on_malformed(&self, error: EngineError) -> EngineResult<()> {
        match self.options.malformed_policy {
            MalformedRulePolicy::Ignore => {
                warn!(error = %error, "忽略格式错误的人力配置");
                Ok(())
            }
            MalformedRulePolicy::Fail => Err(error),
        }
    }

    // ==========================================
    // 需求生成
    // ==========================================

    /// 定额区间: 每个非零岗位一条需求
    fn apply_bracket(
        &self,
        event: &Event,
        bracket: &ManningBracket,
        counts: &[BracketCount],
        overlapping: usize,
        roles: &[Role],
    ) -> Vec<Requirement> {
        counts
            .iter()
            .filter(|c| c.count > 0)
            .map(|c| {
                let mut reasoning = vec![format!(
                    "BRACKET: department={}, range={} guests contains guest_count={}, headcount={}",
                    bracket.department,
                    bracket.range_label(),
                    event.guest_count,
                    c.count
                )];
                if overlapping > 1 {
                    reasoning.push(format!(
                        "BRACKET_OVERLAP: {} brackets contain guest_count={}, \
                         picked lowest guest_min={}",
                        overlapping, event.guest_count, bracket.guest_min
                    ));
                }
                Requirement {
                    event_id: event.id,
                    venue_id: event.venue_id,
                    department: bracket.department.clone(),
                    role_id: c.role_id,
                    role_name: role_name_of(roles, c.role_id),
                    count: c.count,
                    reasoning,
                }
            })
            .collect()
    }

    /// 比例规则: 计算、阈值增量、夹紧；结果为 0 时不产生需求
    fn apply_ratio(
        &self,
        event: &Event,
        rule: &RatioRule,
        roles: &[Role],
    ) -> EngineResult<Option<Requirement>> {
        if let Err(message) = rule.validate() {
            self.on_malformed(EngineError::MalformedRule {
                venue_id: rule.venue_id,
                department: rule.department.clone(),
                role_id: rule.role_id,
                message,
            })?;
            return Ok(None);
        }

        let guests = u64::from(event.guest_count);
        let mut reasoning = Vec::new();

        let mut count: u64 = if rule.ratio_guests > 0 {
            let units = guests.div_ceil(u64::from(rule.ratio_guests));
            let count = units.saturating_mul(u64::from(rule.ratio_staff));
            reasoning.push(format!(
                "RATIO: {} staff per {} guests, ceil({}/{}) * {} = {}",
                rule.ratio_staff,
                rule.ratio_guests,
                guests,
                rule.ratio_guests,
                rule.ratio_staff,
                count
            ));
            count
        } else {
            reasoning.push(format!(
                "MINIMUM: fixed minimum rule, min_required={}",
                rule.min_required
            ));
            u64::from(rule.min_required)
        };

        if let (Some(threshold_guests), Some(threshold_staff)) =
            (rule.threshold_guests, rule.threshold_staff)
        {
            if guests >= u64::from(threshold_guests) {
                count = count.saturating_add(u64::from(threshold_staff));
                reasoning.push(format!(
                    "THRESHOLD: guest_count={} >= {}, +{} staff",
                    guests, threshold_guests, threshold_staff
                ));
            }
        }

        if count < u64::from(rule.min_required) {
            reasoning.push(format!(
                "CLAMP_MIN: raised {} to min_required={}",
                count, rule.min_required
            ));
            count = u64::from(rule.min_required);
        }
        if let Some(max_allowed) = rule.max_allowed {
            if count > u64::from(max_allowed) {
                reasoning.push(format!(
                    "CLAMP_MAX: lowered {} to max_allowed={}",
                    count, max_allowed
                ));
                count = u64::from(max_allowed);
            }
        }

        if count == 0 {
            debug!(
                event_id = event.id,
                role_id = rule.role_id,
                "比例规则结果为 0，不产生需求"
            );
            return Ok(None);
        }

        Ok(Some(Requirement {
            event_id: event.id,
            venue_id: event.venue_id,
            department: rule.department.clone(),
            role_id: rule.role_id,
            role_name: role_name_of(roles, rule.role_id),
            count: u32::try_from(count).unwrap_or(u32::MAX),
            reasoning,
        }))
    }
}

/// 场馆涉及的部门（按首次出现顺序: 先定额区间，后比例规则）
fn departments_for_venue(
    venue_id: VenueId,
    rules: &[RatioRule],
    brackets: &[ManningBracket],
) -> Vec<String> {
    let mut departments: Vec<String> = Vec::new();
    let names = brackets
        .iter()
        .filter(|b| b.venue_id == venue_id)
        .map(|b| &b.department)
        .chain(rules.iter().filter(|r| r.venue_id == venue_id).map(|r| &r.department));
    for name in names {
        if !departments.iter().any(|d| d == name) {
            departments.push(name.clone());
        }
    }
    departments
}
