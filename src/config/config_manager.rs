// ==========================================
// 场馆排班引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写、快照
// 存储: 内存键值表（scope = global）；落库由外部负责
// ==========================================

use crate::config::staffing_config_trait::{ConfigResult, StaffingConfigReader};
use crate::domain::types::{AvailabilityStatus, BracketOverlapPolicy, MalformedRulePolicy};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::sync::RwLock;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Default)]
pub struct ConfigManager {
    global: RwLock<BTreeMap<String, String>>,
}

impl ConfigManager {
    /// 创建空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有键值对创建
    pub fn from_kv(values: HashMap<String, String>) -> Self {
        Self {
            global: RwLock::new(values.into_iter().collect()),
        }
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(
        &self,
        key: &str,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let global = self.global.read().map_err(|e| format!("锁获取失败: {}", e))?;
        Ok(global.get(key).cloned())
    }

    /// 写入 global scope 的配置值（覆盖旧值）
    pub fn set_global_config_value(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut global = self.global.write().map_err(|e| format!("锁获取失败: {}", e))?;
        global.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 与排班方案一同存档，便于复盘当时生效的策略
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        let global = self.global.read().map_err(|e| format!("锁获取失败: {}", e))?;
        Ok(serde_json::to_string(&*global)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 以 `__meta_` 开头的键为元信息，不回写
    pub fn restore_from_snapshot(
        &self,
        snapshot_json: &str,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut global = self.global.write().map_err(|e| format!("锁获取失败: {}", e))?;
        let mut count = 0;
        for (key, value) in config_map {
            if key.starts_with("__meta_") {
                continue;
            }
            global.insert(key, value);
            count += 1;
        }
        Ok(count)
    }
}

// ==========================================
// StaffingConfigReader 实现
// ==========================================
#[async_trait]
impl StaffingConfigReader for ConfigManager {
    async fn get_bracket_overlap_policy(&self) -> ConfigResult<BracketOverlapPolicy> {
        let value =
            self.get_config_or_default(config_keys::BRACKET_OVERLAP_POLICY, "FIRST_BY_MIN")?;
        Ok(BracketOverlapPolicy::parse(&value).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::BRACKET_OVERLAP_POLICY,
                raw_value = %value,
                "区间重叠策略配置无效，使用默认值"
            );
            BracketOverlapPolicy::default()
        }))
    }

    async fn get_malformed_rule_policy(&self) -> ConfigResult<MalformedRulePolicy> {
        let value = self.get_config_or_default(config_keys::MALFORMED_RULE_POLICY, "IGNORE")?;
        Ok(MalformedRulePolicy::parse(&value).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::MALFORMED_RULE_POLICY,
                raw_value = %value,
                "格式错误处理策略配置无效，使用默认值"
            );
            MalformedRulePolicy::default()
        }))
    }

    async fn get_committed_staff_status(&self) -> ConfigResult<AvailabilityStatus> {
        let value = self.get_config_or_default(config_keys::COMMITTED_STAFF_STATUS, "IN_EVENT")?;
        match AvailabilityStatus::parse(&value) {
            // AVAILABLE 会让已排人员在下次生成时被重复分配
            Some(status) if status != AvailabilityStatus::Available => Ok(status),
            _ => {
                tracing::warn!(
                    config_key = config_keys::COMMITTED_STAFF_STATUS,
                    raw_value = %value,
                    "提交后员工状态配置无效，使用 IN_EVENT"
                );
                Ok(AvailabilityStatus::InEvent)
            }
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 需求计算
    pub const BRACKET_OVERLAP_POLICY: &str = "bracket_overlap_policy";
    pub const MALFORMED_RULE_POLICY: &str = "malformed_rule_policy";

    // 方案提交
    pub const COMMITTED_STAFF_STATUS: &str = "committed_staff_status";
}
