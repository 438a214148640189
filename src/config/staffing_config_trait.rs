// ==========================================
// 场馆排班引擎 - 排班配置读取 Trait
// ==========================================
// 职责: 定义编排层所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::{AvailabilityStatus, BracketOverlapPolicy, MalformedRulePolicy};
use crate::engine::requirement_calculator::CalculatorOptions;
use async_trait::async_trait;
use std::error::Error;

/// 配置读取结果
pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// StaffingConfigReader Trait
// ==========================================
// 实现者: ConfigManager（global scope 键值配置）
#[async_trait]
pub trait StaffingConfigReader: Send + Sync {
    /// 定额区间重叠时的处理策略
    ///
    /// # 默认值
    /// - FIRST_BY_MIN
    async fn get_bracket_overlap_policy(&self) -> ConfigResult<BracketOverlapPolicy>;

    /// 格式错误的规则/区间的处理策略
    ///
    /// # 默认值
    /// - IGNORE
    async fn get_malformed_rule_policy(&self) -> ConfigResult<MalformedRulePolicy>;

    /// 方案提交后员工被置为的状态
    ///
    /// # 默认值
    /// - IN_EVENT
    async fn get_committed_staff_status(&self) -> ConfigResult<AvailabilityStatus>;

    /// 组装需求计算选项
    async fn get_calculator_options(&self) -> ConfigResult<CalculatorOptions> {
        Ok(CalculatorOptions {
            overlap_policy: self.get_bracket_overlap_policy().await?,
            malformed_policy: self.get_malformed_rule_policy().await?,
        })
    }
}
