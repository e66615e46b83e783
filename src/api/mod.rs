// ==========================================
// 车间生产排产系统 - API 层
// ==========================================
// 职责: 提供排产业务 API 接口,供会话层调用
// ==========================================

pub mod error;
pub mod schedule_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use schedule_api::{
    OptimizeOutcome, PlanOutcome, RescheduleOutcome, ScheduleApi, TransitionOutcome,
};
pub use validator::SnapshotValidator;
