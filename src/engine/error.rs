// ==========================================
// 场馆排班引擎 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 引擎只会因格式错误的配置失败；
//       缺少规则/缺少人员不是错误，通过数据表达
// ==========================================

use crate::domain::types::{RoleId, VenueId};
use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("定额区间格式错误: venue_id={venue_id}, department={department}: {message}")]
    MalformedBracket {
        venue_id: VenueId,
        department: String,
        message: String,
    },

    #[error(
        "比例规则格式错误: venue_id={venue_id}, department={department}, \
         role_id={role_id}: {message}"
    )]
    MalformedRule {
        venue_id: VenueId,
        department: String,
        role_id: RoleId,
        message: String,
    },

    #[error(
        "定额区间重叠: venue_id={venue_id}, department={department}, \
         guest_count={guest_count}, first={first}, second={second}"
    )]
    OverlappingBrackets {
        venue_id: VenueId,
        department: String,
        guest_count: u32,
        first: String,
        second: String,
    },
}

impl EngineError {
    /// 出错的场馆
    pub fn venue_id(&self) -> VenueId {
        match self {
            EngineError::MalformedBracket { venue_id, .. }
            | EngineError::MalformedRule { venue_id, .. }
            | EngineError::OverlappingBrackets { venue_id, .. } => *venue_id,
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

// ==========================================
// 编排层错误
// ==========================================

#[derive(Error, Debug)]
pub enum PlanningError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("配置读取失败: {0}")]
    Config(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("该日期已存在排班方案，请使用重新生成: date={date}")]
    PlanAlreadyExists { date: NaiveDate },
}

impl PlanningError {
    /// 面向用户的提示
    ///
    /// 配置类错误统一提示检查场馆规则，不建议重试
    pub fn user_message(&self) -> String {
        match self {
            PlanningError::Engine(e) => format!(
                "Staffing calculation failed, check venue rules for venue {}",
                e.venue_id()
            ),
            PlanningError::Repository(_) => "Could not load or save staffing data".to_string(),
            PlanningError::Config(_) => "Staffing configuration could not be read".to_string(),
            PlanningError::InvalidInput(msg) => format!("Invalid request: {}", msg),
            PlanningError::PlanAlreadyExists { date } => {
                format!("A staffing plan already exists for {}; regenerate it instead", date)
            }
        }
    }
}

/// Result 类型别名
pub type PlanningResult<T> = Result<T, PlanningError>;
