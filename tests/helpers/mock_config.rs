// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use venue_staffing_engine::config::{ConfigResult, StaffingConfigReader};
use venue_staffing_engine::domain::types::{
    AvailabilityStatus, BracketOverlapPolicy, MalformedRulePolicy,
};

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub overlap_policy: BracketOverlapPolicy,
    pub malformed_policy: MalformedRulePolicy,
    pub committed_status: AvailabilityStatus,
    /// 为 true 时所有读取均失败
    pub broken: bool,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            overlap_policy: BracketOverlapPolicy::FirstByMin,
            malformed_policy: MalformedRulePolicy::Ignore,
            committed_status: AvailabilityStatus::InEvent,
            broken: false,
        }
    }

    /// 严格模式: 区间重叠与格式错误都报错
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.overlap_policy = BracketOverlapPolicy::Reject;
        config.malformed_policy = MalformedRulePolicy::Fail;
        config
    }

    /// 读取即失败的配置
    pub fn broken() -> Self {
        let mut config = Self::default();
        config.broken = true;
        config
    }

    fn check(&self) -> ConfigResult<()> {
        if self.broken {
            return Err("config store unavailable".into());
        }
        Ok(())
    }
}

#[async_trait]
impl StaffingConfigReader for MockConfig {
    async fn get_bracket_overlap_policy(&self) -> ConfigResult<BracketOverlapPolicy> {
        self.check()?;
        Ok(self.overlap_policy)
    }

    async fn get_malformed_rule_policy(&self) -> ConfigResult<MalformedRulePolicy> {
        self.check()?;
        Ok(self.malformed_policy)
    }

    async fn get_committed_staff_status(&self) -> ConfigResult<AvailabilityStatus> {
        self.check()?;
        Ok(self.committed_status)
    }
}
