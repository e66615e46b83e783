// ==========================================
// 车间生产排产系统 - 机台时钟
// ==========================================
// 职责: 机台编号 → 最早空闲时间 的显式映射
// 红线: 时钟是显式传递的值,不做隐藏单例;
//       reserve 只进不退(单调非递减)
// ==========================================

use crate::domain::resource::Machine;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

// ==========================================
// ResourceClock - 机台空闲时钟
// ==========================================
#[derive(Debug, Clone)]
pub struct ResourceClock {
    /// 机台编号 → 最早空闲时间
    free_at: HashMap<String, DateTime<Utc>>,
}

impl ResourceClock {
    /// 按机台清单初始化时钟
    ///
    /// 仅 OPERATIONAL 机台入钟,空闲时间统一初始化为注入的 now。
    ///
    /// # 参数
    /// - `machines`: 机台清单
    /// - `now`: 运行基准时间（由调用方注入,便于测试固定时间）
    pub fn for_machines(machines: &[Machine], now: DateTime<Utc>) -> Self {
        let free_at = machines
            .iter()
            .filter(|m| m.is_operational())
            .map(|m| (m.machine_id.clone(), now))
            .collect();
        Self { free_at }
    }

    /// 查看机台当前空闲时间（不产生任何变更）
    pub fn peek(&self, machine_id: &str) -> Option<DateTime<Utc>> {
        self.free_at.get(machine_id).copied()
    }

    /// 占用机台时窗
    ///
    /// 仅当 end 晚于当前空闲时间时才推进,时钟永不回拨。
    pub fn reserve(&mut self, machine_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) {
        debug_assert!(start < end, "占用区间必须非空");

        self.free_at
            .entry(machine_id.to_string())
            .and_modify(|free| {
                if end > *free {
                    *free = end;
                }
            })
            .or_insert(end);
    }

    /// 机台是否在钟内
    pub fn is_tracked(&self, machine_id: &str) -> bool {
        self.free_at.contains_key(machine_id)
    }

    /// 在钟机台数
    pub fn tracked_count(&self) -> usize {
        self.free_at.len()
    }
}
