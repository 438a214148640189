// ==========================================
// 场馆排班引擎 - 配置层
// ==========================================
// 职责: 系统配置管理（global scope 键值对）
// ==========================================

pub mod config_manager;
pub mod staffing_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use staffing_config_trait::{ConfigResult, StaffingConfigReader};
