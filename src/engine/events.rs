// ==========================================
// 场馆排班引擎 - 排班事件发布
// ==========================================
// 职责: 定义排班事件发布 trait，实现依赖倒置
// 说明: 编排层在方案提交后发布，由外部（通知/看板刷新）实现
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// 排班事件类型
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanEventType {
    /// 首次生成方案
    PlanGenerated,
    /// 重新生成方案
    PlanRegenerated,
}

impl PlanEventType {
    pub fn as_str(&self) -> &str {
        match self {
            PlanEventType::PlanGenerated => "PlanGenerated",
            PlanEventType::PlanRegenerated => "PlanRegenerated",
        }
    }
}

/// 排班事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEvent {
    pub plan_id: Uuid,
    pub date: NaiveDate,
    pub event_type: PlanEventType,
    /// 发起人
    pub requested_by: Option<String>,
    pub assignments_count: usize,
    /// 缺口总人数
    pub total_shortage: u32,
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 排班事件发布者 Trait
pub trait PlanEventPublisher: Send + Sync {
    /// 发布排班事件
    ///
    /// # 返回
    /// - `Ok(task_id)`: 任务 ID（如果支持）或空字符串
    /// - `Err`: 发布失败
    fn publish(&self, event: PlanEvent) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
///
/// 用于不需要事件发布的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpPlanEventPublisher;

impl PlanEventPublisher for NoOpPlanEventPublisher {
    fn publish(&self, event: PlanEvent) -> Result<String, Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpPlanEventPublisher: 跳过事件发布 - plan_id={}, event_type={}",
            event.plan_id,
            event.event_type.as_str()
        );
        Ok(String::new())
    }
}

/// 可选的事件发布者包装
///
/// 简化 Option<Arc<dyn PlanEventPublisher>> 的使用
#[derive(Clone)]
pub struct OptionalPlanEventPublisher {
    inner: Option<Arc<dyn PlanEventPublisher>>,
}

impl OptionalPlanEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn PlanEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（如果有发布者）
    pub fn publish(&self, event: PlanEvent) -> Result<String, Box<dyn Error + Send + Sync>> {
        match &self.inner {
            Some(publisher) => publisher.publish(event),
            None => {
                tracing::debug!(
                    "OptionalPlanEventPublisher: 未配置发布者，跳过事件 - \
                     plan_id={}, event_type={}",
                    event.plan_id,
                    event.event_type.as_str()
                );
                Ok(String::new())
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalPlanEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingPublisher {
        events: Mutex<Vec<PlanEvent>>,
    }

    impl PlanEventPublisher for RecordingPublisher {
        fn publish(&self, event: PlanEvent) -> Result<String, Box<dyn Error + Send + Sync>> {
            self.events.lock().map_err(|e| e.to_string())?.push(event);
            Ok("task-1".to_string())
        }
    }

    fn sample_event() -> PlanEvent {
        PlanEvent {
            plan_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            event_type: PlanEventType::PlanGenerated,
            requested_by: None,
            assignments_count: 3,
            total_shortage: 1,
        }
    }

    #[test]
    fn test_noop_publisher() {
        let result = NoOpPlanEventPublisher.publish(sample_event());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_optional_publisher_none() {
        let publisher = OptionalPlanEventPublisher::none();
        assert!(!publisher.is_configured());
        assert!(publisher.publish(sample_event()).is_ok());
    }

    #[test]
    fn test_optional_publisher_forwards() {
        let recorder = Arc::new(RecordingPublisher {
            events: Mutex::new(Vec::new()),
        });
        let publisher = OptionalPlanEventPublisher::with_publisher(recorder.clone());
        assert!(publisher.is_configured());

        let task_id = publisher.publish(sample_event()).unwrap();
        assert_eq!(task_id, "task-1");
        assert_eq!(recorder.events.lock().unwrap().len(), 1);
    }
}
