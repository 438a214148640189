// ==========================================
// 场馆排班引擎 - 员工
// ==========================================

use crate::domain::types::{AvailabilityStatus, EmploymentType, RoleId, StaffId, VenueId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub full_name: String,
    pub primary_role_id: RoleId,
    #[serde(default)]
    pub secondary_roles: BTreeSet<RoleId>,
    pub home_base_venue_id: Option<VenueId>,
    pub availability_status: AvailabilityStatus,
    pub employment_type: EmploymentType,
}

impl StaffMember {
    /// 创建可用的全职员工（无副岗、无本场馆）
    pub fn new(id: StaffId, full_name: &str, primary_role_id: RoleId) -> Self {
        Self {
            id,
            full_name: full_name.to_string(),
            primary_role_id,
            secondary_roles: BTreeSet::new(),
            home_base_venue_id: None,
            availability_status: AvailabilityStatus::Available,
            employment_type: EmploymentType::FullTime,
        }
    }

    pub fn with_home_base(mut self, venue_id: VenueId) -> Self {
        self.home_base_venue_id = Some(venue_id);
        self
    }

    pub fn with_secondary_roles(mut self, roles: &[RoleId]) -> Self {
        self.secondary_roles.extend(roles.iter().copied());
        self
    }

    pub fn with_status(mut self, status: AvailabilityStatus) -> Self {
        self.availability_status = status;
        self
    }

    /// 主岗或副岗匹配
    pub fn can_fill(&self, role_id: RoleId) -> bool {
        self.primary_role_id == role_id || self.secondary_roles.contains(&role_id)
    }

    pub fn is_available(&self) -> bool {
        self.availability_status == AvailabilityStatus::Available
    }

    pub fn is_home_base(&self, venue_id: VenueId) -> bool {
        self.home_base_venue_id == Some(venue_id)
    }
}
