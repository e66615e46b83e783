// ==========================================
// 车间生产排产系统 - 工时估算引擎
// ==========================================
// 职责: (零件类型, 数量) → (换型工时, 加工工时)
// 红线: 零件缺失/类型未知走兜底常数,不使运行失败;
//       数量 ≤ 0 是调用方错误,必须拒绝而非钳制
// ==========================================

use crate::config::duration_profile::DurationProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// 估算错误
// ==========================================
#[derive(Debug, Error)]
pub enum DurationError {
    #[error("无效数量: {0} (订购数量必须为正)")]
    InvalidQuantity(i32),
}

// ==========================================
// DurationEstimate - 工时估算结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationEstimate {
    pub setup_minutes: i64, // 换型工时（分钟）
    pub run_minutes: i64,   // 加工工时（分钟）
}

impl DurationEstimate {
    pub fn total_minutes(&self) -> i64 {
        self.setup_minutes + self.run_minutes
    }
}

// ==========================================
// DurationEstimator - 工时估算引擎
// ==========================================
pub struct DurationEstimator {
    profile: DurationProfile,
}

impl DurationEstimator {
    /// 构造函数
    ///
    /// # 参数
    /// - `profile`: 工时档案（已校验）
    pub fn new(profile: DurationProfile) -> Self {
        Self { profile }
    }

    /// 估算一个请求的工时
    ///
    /// 规则:
    /// 1) 数量 ≤ 0 → 拒绝
    /// 2) 类型在档 → 档案定额
    /// 3) 类型缺失/未知 → 兜底常数（显式降级,不是错误）
    /// 4) 加工工时 = 单件工时 × 数量
    ///
    /// # 参数
    /// - `part_type`: 零件类型标签（可缺失）
    /// - `quantity`: 订购数量
    pub fn estimate(
        &self,
        part_type: Option<&str>,
        quantity: i32,
    ) -> Result<DurationEstimate, DurationError> {
        if quantity <= 0 {
            return Err(DurationError::InvalidQuantity(quantity));
        }

        let (setup_minutes, run_minutes_per_unit) = self.profile.norm_for(part_type);
        let run_minutes = run_minutes_per_unit * quantity as i64;
        debug_assert!(setup_minutes >= 0 && run_minutes > 0, "估算工时必须非负");

        Ok(DurationEstimate {
            setup_minutes,
            run_minutes,
        })
    }
}

impl Default for DurationEstimator {
    fn default() -> Self {
        Self::new(DurationProfile::default())
    }
}
