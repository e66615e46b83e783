// ==========================================
// 车间生产排产系统 - 配置层
// ==========================================
// 职责: 工时档案的加载与校验
// 存储: JSON 文件（由调用方给定路径）或内置默认档案
// ==========================================

pub mod duration_profile;

// 重导出核心配置类型
pub use duration_profile::{
    ConfigError, DurationProfile, PartTypeNorm, FALLBACK_RUN_MINUTES_PER_UNIT,
    FALLBACK_SETUP_MINUTES,
};
