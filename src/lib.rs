// ==========================================
// 车间生产排产系统 - 核心库
// ==========================================
// 系统定位: 排产与冲突检测引擎 (快照输入 / 确定性输出)
// 技术栈: Rust + tokio + serde
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 工时档案
pub mod config;

// 引擎层 - 排产算法
pub mod engine;

// API 层 - 业务接口
pub mod api;

// 会话层 - 运行串行化与快照读取
pub mod session;

// 日志系统
pub mod logging;

// 性能监控
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    ConflictSeverity, ConflictType, JobStatus, MachineStatus, RequestPriority, TransitionAction,
};

// 领域实体
pub use domain::{
    Machine, Operator, PlanWarning, ProductionRequest, ScheduleConflict, ScheduleSnapshot,
    ScheduledJob,
};

// 引擎
pub use engine::{
    AssignmentPlanner, CapabilityMatrix, ConflictDetector, DurationEstimator, RequestSorter,
    ResourceClock, ScheduleOptimizer, TagCapabilityMatrix, UniversalCapability,
};

// 配置
pub use config::DurationProfile;

// API
pub use api::{
    ApiError, ApiResult, OptimizeOutcome, PlanOutcome, RescheduleOutcome, ScheduleApi,
    TransitionOutcome,
};

// 会话
pub use session::{InMemorySnapshotSource, ScheduleSession, SnapshotSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车间生产排产系统";

// ==========================================
// 预编译检查
// ==========================================
