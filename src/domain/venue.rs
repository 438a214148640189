// ==========================================
// 场馆排班引擎 - 场馆与岗位
// ==========================================

use crate::domain::types::{RoleId, VenueId};
use serde::{Deserialize, Serialize};

/// 场馆（只读快照，仅用于描述排班上下文）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub venue_type: String,
    pub default_service_style: Option<String>,
}

/// 岗位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

impl Role {
    pub fn new(id: RoleId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// 根据岗位 ID 查找岗位名称
///
/// 岗位缺失不是错误：返回 `Role #<id>` 作为占位名称
pub fn role_name_of(roles: &[Role], role_id: RoleId) -> String {
    roles
        .iter()
        .find(|r| r.id == role_id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| format!("Role #{}", role_id))
}
