// ==========================================
// 车间生产排产系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换引擎/配置层错误为用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因,不允许裸错误码
// ==========================================

use crate::config::ConfigError;
use crate::engine::DurationError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 数据来源错误
    // ==========================================
    #[error("快照不可用: {0}")]
    SnapshotUnavailable(String),

    #[error("配置错误: {0}")]
    Config(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从引擎/配置层错误转换
// 目的: 将内层技术错误转换为用户友好的业务错误
// ==========================================
impl From<DurationError> for ApiError {
    fn from(err: DurationError) -> Self {
        match err {
            DurationError::InvalidQuantity(_) => ApiError::InvalidInput(err.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
