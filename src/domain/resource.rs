// ==========================================
// 车间生产排产系统 - 资源领域模型
// ==========================================
// 职责: 机台与操作工两类生产资源
// 红线: 资源清单由外部系统维护,引擎按快照只读消费
// ==========================================

use crate::domain::types::MachineStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// Machine - 机台
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    pub machine_id: String,    // 机台编号
    pub machine_type: String,  // 机台类型/能力标签
    pub status: MachineStatus, // 机台状态（仅 OPERATIONAL 参与排产）
}

impl Machine {
    /// 判断是否参与排产
    pub fn is_operational(&self) -> bool {
        self.status.is_operational()
    }
}

// ==========================================
// Operator - 操作工
// ==========================================
// 作业允许无人值守,操作工分配为可选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    pub operator_id: String, // 工号
    pub name: String,        // 姓名
    pub active: bool,        // 在岗标志（仅在岗人员可被分配）
}
