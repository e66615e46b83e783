// ==========================================
// 车间生产排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、状态机规则
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod conflict;
pub mod job;
pub mod request;
pub mod resource;
pub mod snapshot;
pub mod types;

// 重导出核心类型
pub use conflict::{PlanWarning, ScheduleConflict};
pub use job::ScheduledJob;
pub use request::ProductionRequest;
pub use resource::{Machine, Operator};
pub use snapshot::ScheduleSnapshot;
pub use types::{
    ConflictSeverity, ConflictType, JobStatus, MachineStatus, RequestPriority, TransitionAction,
};
