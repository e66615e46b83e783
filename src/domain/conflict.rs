// ==========================================
// 车间生产排产系统 - 冲突报告领域模型
// ==========================================
// 红线: 冲突是派生数据,不脱离产生它的作业清单独立存在,
//       作业变化后必须整表重检
// ==========================================

use crate::domain::types::{ConflictSeverity, ConflictType};
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleConflict - 资源双占冲突
// ==========================================
// 两个作业共享机台或操作工且时窗重叠
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    /// 冲突类型 (MACHINE/OPERATOR)
    pub conflict_type: ConflictType,

    /// 严重度 (机台 HIGH / 人员 MEDIUM)
    pub severity: ConflictSeverity,

    /// 冲突作业（按作业清单顺序,前者下标小）
    pub first_job_id: String,

    /// 冲突作业（后者）
    pub second_job_id: String,

    /// 被双占的资源 (机台编号或工号)
    pub resource_id: String,

    /// 处置建议
    pub resolution_hint: String,
}

impl ScheduleConflict {
    /// 构建机台双占冲突
    pub fn machine(first_job_id: &str, second_job_id: &str, machine_id: &str) -> Self {
        Self {
            conflict_type: ConflictType::Machine,
            severity: ConflictType::Machine.severity(),
            first_job_id: first_job_id.to_string(),
            second_job_id: second_job_id.to_string(),
            resource_id: machine_id.to_string(),
            resolution_hint: format!(
                "机台 {} 被作业 {} 与 {} 双占,请平移其中一个作业或改派机台",
                machine_id, first_job_id, second_job_id
            ),
        }
    }

    /// 构建人员双占冲突
    pub fn operator(first_job_id: &str, second_job_id: &str, operator_id: &str) -> Self {
        Self {
            conflict_type: ConflictType::Operator,
            severity: ConflictType::Operator.severity(),
            first_job_id: first_job_id.to_string(),
            second_job_id: second_job_id.to_string(),
            resource_id: operator_id.to_string(),
            resolution_hint: format!(
                "操作工 {} 被作业 {} 与 {} 双占,请改派操作工或错开时窗",
                operator_id, first_job_id, second_job_id
            ),
        }
    }

    /// 判断冲突是否涉及指定作业
    pub fn involves(&self, job_id: &str) -> bool {
        self.first_job_id == job_id || self.second_job_id == job_id
    }
}

// ==========================================
// PlanWarning - 运行告警
// ==========================================
// 非致命: 单个请求被跳过,运行整体继续
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanWarning {
    /// 受影响请求
    pub request_id: String,

    /// 告警原因（带稳定前缀码,如 NO_CAPABLE_MACHINE）
    pub reason: String,
}

impl PlanWarning {
    /// 无可用产能机台告警
    pub fn no_capable_machine(request_id: &str, part_type: Option<&str>) -> Self {
        let part_desc = part_type.unwrap_or("<未指定>");
        Self {
            request_id: request_id.to_string(),
            reason: format!(
                "NO_CAPABLE_MACHINE: 请求 {} 无可用产能机台 (零件类型: {}),已跳过",
                request_id, part_desc
            ),
        }
    }
}
