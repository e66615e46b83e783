// ==========================================
// 车间生产排产系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与外部系统一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 请求优先级 (Request Priority)
// ==========================================
// 红线: 等级制,排序口径为 rank 升序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestPriority {
    Rush,   // 加急
    High,   // 高
    Normal, // 正常
    Low,    // 低
}

impl RequestPriority {
    /// 数值序 (rush=0, high=1, normal=2, low=3)
    pub fn rank(&self) -> i32 {
        match self {
            RequestPriority::Rush => 0,
            RequestPriority::High => 1,
            RequestPriority::Normal => 2,
            RequestPriority::Low => 3,
        }
    }

    /// 从字符串解析优先级（未知值按 LOW 处理）
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "RUSH" => RequestPriority::Rush,
            "HIGH" => RequestPriority::High,
            "NORMAL" => RequestPriority::Normal,
            "LOW" => RequestPriority::Low,
            _ => RequestPriority::Low, // 默认值
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPriority::Rush => "RUSH",
            RequestPriority::High => "HIGH",
            RequestPriority::Normal => "NORMAL",
            RequestPriority::Low => "LOW",
        }
    }
}

impl fmt::Display for RequestPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 机台状态 (Machine Status)
// ==========================================
// 红线: 只有 OPERATIONAL 的机台参与排产
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineStatus {
    Operational, // 可用
    Maintenance, // 检修
    Offline,     // 停机
}

impl MachineStatus {
    pub fn is_operational(&self) -> bool {
        matches!(self, MachineStatus::Operational)
    }

    /// 从字符串解析机台状态（未知值按停机处理,保守口径）
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "OPERATIONAL" => MachineStatus::Operational,
            "MAINTENANCE" => MachineStatus::Maintenance,
            "OFFLINE" => MachineStatus::Offline,
            _ => MachineStatus::Offline,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Operational => "OPERATIONAL",
            MachineStatus::Maintenance => "MAINTENANCE",
            MachineStatus::Offline => "OFFLINE",
        }
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 作业状态 (Job Status)
// ==========================================
// 状态机: SCHEDULED → IN_PROGRESS → COMPLETED
//         SCHEDULED ↔ DELAYED 为创建/重算时派生
//         非终态均可 → CANCELLED
// 终态: COMPLETED / CANCELLED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Scheduled,  // 已排产
    InProgress, // 执行中
    Completed,  // 已完成
    Delayed,    // 预计延期
    Cancelled,  // 已取消
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }

    /// 从字符串解析作业状态（未知值按初始态 SCHEDULED 处理）
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "SCHEDULED" => JobStatus::Scheduled,
            "IN_PROGRESS" => JobStatus::InProgress,
            "COMPLETED" => JobStatus::Completed,
            "DELAYED" => JobStatus::Delayed,
            "CANCELLED" => JobStatus::Cancelled,
            _ => JobStatus::Scheduled, // 默认值
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Scheduled => "SCHEDULED",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Delayed => "DELAYED",
            JobStatus::Cancelled => "CANCELLED",
        }
    }

    /// 状态机合法转换表
    ///
    /// 返回动作生效后的目标状态；非法转换返回 None,由 API 层
    /// 转换为带当前/目标状态的拒绝错误。
    pub fn apply(&self, action: TransitionAction) -> Option<JobStatus> {
        match (self, action) {
            // 开工: 已排产/预计延期 → 执行中
            (JobStatus::Scheduled, TransitionAction::Start) => Some(JobStatus::InProgress),
            (JobStatus::Delayed, TransitionAction::Start) => Some(JobStatus::InProgress),
            // 完工: 执行中 → 已完成
            (JobStatus::InProgress, TransitionAction::Complete) => Some(JobStatus::Completed),
            // 标记延期: 仅已排产 → 预计延期
            (JobStatus::Scheduled, TransitionAction::Delay) => Some(JobStatus::Delayed),
            // 取消: 任意非终态 → 已取消
            (s, TransitionAction::Cancel) if !s.is_terminal() => Some(JobStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 状态转换动作 (Transition Action)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionAction {
    Start,    // 开工
    Complete, // 完工
    Delay,    // 标记延期
    Cancel,   // 取消
}

impl TransitionAction {
    /// 从字符串解析动作
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "START" => Some(TransitionAction::Start),
            "COMPLETE" => Some(TransitionAction::Complete),
            "DELAY" => Some(TransitionAction::Delay),
            "CANCEL" => Some(TransitionAction::Cancel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionAction::Start => "START",
            TransitionAction::Complete => "COMPLETE",
            TransitionAction::Delay => "DELAY",
            TransitionAction::Cancel => "CANCEL",
        }
    }

    /// 动作意图到达的目标状态（用于非法转换的拒绝信息）
    pub fn target_status(&self) -> JobStatus {
        match self {
            TransitionAction::Start => JobStatus::InProgress,
            TransitionAction::Complete => JobStatus::Completed,
            TransitionAction::Delay => JobStatus::Delayed,
            TransitionAction::Cancel => JobStatus::Cancelled,
        }
    }
}

impl fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 冲突类型 (Conflict Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictType {
    Machine,  // 机台双占
    Operator, // 人员双占
}

impl ConflictType {
    /// 冲突类型决定严重度: 机台冲突高,人员冲突中
    pub fn severity(&self) -> ConflictSeverity {
        match self {
            ConflictType::Machine => ConflictSeverity::High,
            ConflictType::Operator => ConflictSeverity::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictType::Machine => "MACHINE",
            ConflictType::Operator => "OPERATOR",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 冲突严重度 (Conflict Severity)
// ==========================================
// 顺序: Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictSeverity {
    Medium, // 中
    High,   // 高
}

impl ConflictSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictSeverity::Medium => "MEDIUM",
            ConflictSeverity::High => "HIGH",
        }
    }
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
