// ==========================================
// 车间生产排产系统 - 输入快照
// ==========================================
// 职责: 单次运行开始时一次性读取的不可变输入集合
// 红线: 运行过程中不回读外部数据,快照即唯一事实
// ==========================================

use crate::domain::request::ProductionRequest;
use crate::domain::resource::{Machine, Operator};
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleSnapshot - 排产输入快照
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub requests: Vec<ProductionRequest>, // 待排请求
    pub machines: Vec<Machine>,           // 机台清单
    pub operators: Vec<Operator>,         // 操作工清单
}

impl ScheduleSnapshot {
    pub fn new(
        requests: Vec<ProductionRequest>,
        machines: Vec<Machine>,
        operators: Vec<Operator>,
    ) -> Self {
        Self {
            requests,
            machines,
            operators,
        }
    }

    /// 参与排产的机台（仅 OPERATIONAL）
    pub fn operational_machines(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter().filter(|m| m.is_operational())
    }

    /// 可被分配的操作工（仅在岗）
    pub fn active_operators(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter().filter(|o| o.active)
    }
}
