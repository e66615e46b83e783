// ==========================================
// 车间生产排产系统 - 产能匹配
// ==========================================
// 职责: "哪些机台能做哪类零件" 的可注入判定
// 红线: 判定是策略对象而非硬编码规则,换产线不改引擎代码
// ==========================================

use crate::domain::resource::Machine;
use std::collections::{HashMap, HashSet};

// ==========================================
// CapabilityMatrix - 产能判定接口
// ==========================================
pub trait CapabilityMatrix: Send + Sync {
    /// 判断机台能否生产指定零件类型
    ///
    /// # 参数
    /// - `machine`: 候选机台
    /// - `part_type`: 请求的零件类型（可缺失）
    fn is_capable(&self, machine: &Machine, part_type: Option<&str>) -> bool;
}

// ==========================================
// UniversalCapability - 全能判定
// ==========================================
// 未配置产能矩阵时的默认判定: 所有机台全能。
// 受限产线注入 TagCapabilityMatrix。
#[derive(Debug, Clone, Copy, Default)]
pub struct UniversalCapability;

impl CapabilityMatrix for UniversalCapability {
    fn is_capable(&self, _machine: &Machine, _part_type: Option<&str>) -> bool {
        true
    }
}

// ==========================================
// TagCapabilityMatrix - 按类型标签的产能矩阵
// ==========================================
// 零件类型 → 允许的机台类型标签集合。
// 不在矩阵中的零件类型视为无约束;无类型请求任何机台可做。
#[derive(Debug, Clone, Default)]
pub struct TagCapabilityMatrix {
    allowed: HashMap<String, HashSet<String>>,
}

impl TagCapabilityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一条产能规则
    ///
    /// # 参数
    /// - `part_type`: 零件类型标签
    /// - `machine_types`: 允许生产该类型的机台类型标签
    pub fn with_rule<I, S>(mut self, part_type: &str, machine_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.allowed.entry(part_type.to_string()).or_default();
        for machine_type in machine_types {
            entry.insert(machine_type.into());
        }
        self
    }
}

impl CapabilityMatrix for TagCapabilityMatrix {
    fn is_capable(&self, machine: &Machine, part_type: Option<&str>) -> bool {
        match part_type.and_then(|t| self.allowed.get(t)) {
            Some(machine_types) => machine_types.contains(&machine.machine_type),
            None => true,
        }
    }
}
