// ==========================================
// 车间生产排产系统 - 引擎层
// ==========================================
// 职责: 实现排产业务规则引擎,不做任何 I/O
// 红线: 引擎只接受显式传入的基准时间,内部不取 Utc::now()
// 红线: 所有落位/跳过决策必须输出 reason
// ==========================================

pub mod capability;
pub mod clock;
pub mod conflict_detector;
pub mod duration;
pub mod optimizer;
pub mod planner;
pub mod priority;

// 重导出核心引擎
pub use capability::{CapabilityMatrix, TagCapabilityMatrix, UniversalCapability};
pub use clock::ResourceClock;
pub use conflict_detector::ConflictDetector;
pub use duration::{DurationError, DurationEstimate, DurationEstimator};
pub use optimizer::{OptimizeFillResult, ScheduleOptimizer};
pub use planner::{AssignmentPlanner, PlanFillResult};
pub use priority::RequestSorter;
