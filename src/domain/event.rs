// ==========================================
// 场馆排班引擎 - 活动
// ==========================================

use crate::domain::types::{EventId, VenueId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 活动（只读输入，引擎不修改）
///
/// 部门不挂在活动上，由场馆的规则/定额配置推导
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub date: NaiveDate,
    pub venue_id: VenueId,
    pub guest_count: u32,
    pub name: Option<String>,
}

impl Event {
    pub fn new(id: EventId, date: NaiveDate, venue_id: VenueId, guest_count: u32) -> Self {
        Self {
            id,
            date,
            venue_id,
            guest_count,
            name: None,
        }
    }
}
