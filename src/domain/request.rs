// ==========================================
// 车间生产排产系统 - 生产请求领域模型
// ==========================================
// 职责: 排产运行的只读输入单元
// 红线: 请求由外部系统创建,引擎只读不写
// ==========================================

use crate::domain::types::RequestPriority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionRequest - 生产请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionRequest {
    // ===== 主键 =====
    pub request_id: String, // 请求唯一标识

    // ===== 基础信息 =====
    pub customer_id: String,           // 客户编号
    pub part_id: Option<String>,       // 零件编号（可缺失,见工时估算降级规则）
    pub part_type: Option<String>,     // 零件类型标签（工时档案/产能匹配的键）
    pub quantity: i32,                 // 订购数量（必须 > 0）
    pub due_date: DateTime<Utc>,       // 交货期限
    pub priority: RequestPriority,     // 优先级（RUSH/HIGH/NORMAL/LOW）
}

impl ProductionRequest {
    /// 零件类型快照（缺失时返回空串,用于聚类排序的稳定键）
    pub fn part_type_key(&self) -> &str {
        self.part_type.as_deref().unwrap_or("")
    }

    /// 优先级数值序
    pub fn priority_rank(&self) -> i32 {
        self.priority.rank()
    }
}
