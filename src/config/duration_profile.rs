// ==========================================
// 车间生产排产系统 - 工时档案
// ==========================================
// 职责: 零件类型 → (换型工时, 单件加工工时) 查找表
// 红线: 新增零件类型只改配置不改代码;未知类型走固定兜底常数
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// 兜底换型工时（分钟）: 零件缺失或类型未知时使用
pub const FALLBACK_SETUP_MINUTES: i64 = 20;

/// 兜底单件加工工时（分钟/件）
pub const FALLBACK_RUN_MINUTES_PER_UNIT: i64 = 10;

// ==========================================
// 配置错误
// ==========================================
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("工时档案读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("工时档案解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("工时档案非法: {0}")]
    Invalid(String),
}

// ==========================================
// PartTypeNorm - 单个零件类型的工时定额
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartTypeNorm {
    /// 换型工时（分钟）
    pub setup_minutes: i64,

    /// 单件加工工时（分钟/件）
    pub run_minutes_per_unit: i64,
}

// ==========================================
// DurationProfile - 工时档案
// ==========================================
// 序列化形态:
// {
//   "default_setup_minutes": 20,
//   "default_run_minutes_per_unit": 10,
//   "part_types": { "STANDARD": { "setup_minutes": 15, ... }, ... }
// }
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DurationProfile {
    /// 未知类型兜底换型工时
    #[serde(default = "default_setup_minutes")]
    pub default_setup_minutes: i64,

    /// 未知类型兜底单件工时
    #[serde(default = "default_run_minutes_per_unit")]
    pub default_run_minutes_per_unit: i64,

    /// 按零件类型的工时定额（键为类型标签,大小写敏感）
    #[serde(default)]
    pub part_types: HashMap<String, PartTypeNorm>,
}

fn default_setup_minutes() -> i64 {
    FALLBACK_SETUP_MINUTES
}

fn default_run_minutes_per_unit() -> i64 {
    FALLBACK_RUN_MINUTES_PER_UNIT
}

impl Default for DurationProfile {
    /// 内置档案: 两个示例类型 + 兜底常数
    fn default() -> Self {
        let mut part_types = HashMap::new();
        part_types.insert(
            "STANDARD".to_string(),
            PartTypeNorm {
                setup_minutes: 15,
                run_minutes_per_unit: 8,
            },
        );
        part_types.insert(
            "PRECISION".to_string(),
            PartTypeNorm {
                setup_minutes: 30,
                run_minutes_per_unit: 12,
            },
        );
        Self {
            default_setup_minutes: FALLBACK_SETUP_MINUTES,
            default_run_minutes_per_unit: FALLBACK_RUN_MINUTES_PER_UNIT,
            part_types,
        }
    }
}

impl DurationProfile {
    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let profile: DurationProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// 从文件加载并校验
    ///
    /// # 参数
    /// - path: 档案文件路径（JSON）
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 校验工时定额的合法性
    ///
    /// 换型工时允许为 0（免换型）,单件工时必须为正,
    /// 否则会产出空区间作业。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_setup_minutes < 0 {
            return Err(ConfigError::Invalid(format!(
                "兜底换型工时不可为负: {}",
                self.default_setup_minutes
            )));
        }
        if self.default_run_minutes_per_unit <= 0 {
            return Err(ConfigError::Invalid(format!(
                "兜底单件工时必须为正: {}",
                self.default_run_minutes_per_unit
            )));
        }
        for (part_type, norm) in &self.part_types {
            if norm.setup_minutes < 0 {
                return Err(ConfigError::Invalid(format!(
                    "零件类型 {} 换型工时不可为负: {}",
                    part_type, norm.setup_minutes
                )));
            }
            if norm.run_minutes_per_unit <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "零件类型 {} 单件工时必须为正: {}",
                    part_type, norm.run_minutes_per_unit
                )));
            }
        }
        Ok(())
    }

    /// 查定额: 已知类型取档案值,缺失/未知类型取兜底常数
    ///
    /// # 返回
    /// - (换型工时, 单件加工工时)
    pub fn norm_for(&self, part_type: Option<&str>) -> (i64, i64) {
        match part_type.and_then(|t| self.part_types.get(t)) {
            Some(norm) => (norm.setup_minutes, norm.run_minutes_per_unit),
            None => (
                self.default_setup_minutes,
                self.default_run_minutes_per_unit,
            ),
        }
    }
}
