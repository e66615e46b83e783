// ==========================================
// 车间生产排产系统 - 快照输入校验器
// ==========================================
// 职责: 排产前的快照入参校验
// 红线: 无效输入必须在触碰任何排产状态之前被拒绝
// ==========================================

use std::collections::HashSet;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::snapshot::ScheduleSnapshot;

// ==========================================
// SnapshotValidator - 快照校验器
// ==========================================

/// 快照校验器
///
/// 职责:
/// 1. 订购数量必须为正
/// 2. 请求/机台/操作工标识不得为空白
/// 3. 同类标识不得重复
pub struct SnapshotValidator {
    // 无状态引擎,不需要注入依赖
}

impl SnapshotValidator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 校验排产快照
    ///
    /// # 参数
    /// - `snapshot`: 待校验的输入快照
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(ApiError::InvalidInput): 首个违规项的显式原因
    pub fn validate(&self, snapshot: &ScheduleSnapshot) -> ApiResult<()> {
        // 1. 生产请求
        let mut seen_requests = HashSet::new();
        for request in &snapshot.requests {
            if request.request_id.trim().is_empty() {
                return Err(ApiError::InvalidInput("请求标识不得为空白".to_string()));
            }
            if !seen_requests.insert(request.request_id.as_str()) {
                return Err(ApiError::InvalidInput(format!(
                    "请求标识重复: {}",
                    request.request_id
                )));
            }
            if request.quantity <= 0 {
                return Err(ApiError::InvalidInput(format!(
                    "请求 {} 订购数量无效: {} (必须为正)",
                    request.request_id, request.quantity
                )));
            }
        }

        // 2. 机台
        let mut seen_machines = HashSet::new();
        for machine in &snapshot.machines {
            if machine.machine_id.trim().is_empty() {
                return Err(ApiError::InvalidInput("机台标识不得为空白".to_string()));
            }
            if !seen_machines.insert(machine.machine_id.as_str()) {
                return Err(ApiError::InvalidInput(format!(
                    "机台标识重复: {}",
                    machine.machine_id
                )));
            }
        }

        // 3. 操作工
        let mut seen_operators = HashSet::new();
        for operator in &snapshot.operators {
            if operator.operator_id.trim().is_empty() {
                return Err(ApiError::InvalidInput("操作工标识不得为空白".to_string()));
            }
            if !seen_operators.insert(operator.operator_id.as_str()) {
                return Err(ApiError::InvalidInput(format!(
                    "操作工标识重复: {}",
                    operator.operator_id
                )));
            }
        }

        Ok(())
    }
}

impl Default for SnapshotValidator {
    fn default() -> Self {
        Self::new()
    }
}
