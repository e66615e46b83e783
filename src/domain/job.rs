// ==========================================
// 车间生产排产系统 - 排产作业领域模型
// ==========================================
// 职责: 排产运行的输出单元 (请求 → 机台/人员/时窗)
// 红线: 区间为半开区间 [start, end),恒有 start < end
// 红线: scheduled_end = scheduled_start + setup + run
// ==========================================

use crate::domain::request::ProductionRequest;
use crate::domain::types::{JobStatus, TransitionAction};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduledJob - 排产作业
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledJob {
    // ===== 主键与关联 =====
    pub job_id: String,     // 作业ID（由请求ID确定性派生）
    pub request_id: String, // 来源请求

    // ===== 资源分配 =====
    pub machine_id: String,          // 分配机台
    pub operator_id: Option<String>, // 分配操作工（可无人值守）

    // ===== 时窗 =====
    pub scheduled_start: DateTime<Utc>, // 计划开始
    pub scheduled_end: DateTime<Utc>,   // 计划结束（半开区间右端点）
    pub setup_minutes: i64,             // 换型工时（分钟）
    pub run_minutes: i64,               // 加工工时（分钟）

    // ===== 状态与优先级 =====
    pub status: JobStatus, // 作业状态（状态机见 JobStatus）
    pub priority: i32,     // 优先级数值序（来自请求优先级）

    // ===== 快照字段（重算/转换无需回查请求）=====
    pub due_date: DateTime<Utc>,      // 交货期限快照（延期判定口径）
    pub assign_reason: Option<String>, // 落位原因（可解释性）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

impl ScheduledJob {
    /// 由请求与落位结果构建作业
    ///
    /// 结束时间 = 开始时间 + 换型 + 加工；
    /// 结束时间晚于交货期限时状态派生为 DELAYED,否则 SCHEDULED。
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        request: &ProductionRequest,
        machine_id: &str,
        operator_id: Option<String>,
        scheduled_start: DateTime<Utc>,
        setup_minutes: i64,
        run_minutes: i64,
        assign_reason: String,
        now: DateTime<Utc>,
    ) -> Self {
        let scheduled_end =
            scheduled_start + Duration::minutes(setup_minutes + run_minutes);
        debug_assert!(setup_minutes >= 0 && run_minutes >= 0, "工时不可为负");
        debug_assert!(scheduled_start < scheduled_end, "作业区间必须非空");

        Self {
            job_id: format!("JOB-{}", request.request_id),
            request_id: request.request_id.clone(),
            machine_id: machine_id.to_string(),
            operator_id,
            scheduled_start,
            scheduled_end,
            setup_minutes,
            run_minutes,
            status: Self::derive_timing_status(scheduled_end, request.due_date),
            priority: request.priority_rank(),
            due_date: request.due_date,
            assign_reason: Some(assign_reason),
            created_at: now,
            updated_at: now,
        }
    }

    /// 延期判定口径: 结束时间严格晚于交货期限
    pub fn derive_timing_status(
        scheduled_end: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> JobStatus {
        if scheduled_end > due_date {
            JobStatus::Delayed
        } else {
            JobStatus::Scheduled
        }
    }

    /// 作业总工时（分钟）
    pub fn duration_minutes(&self) -> i64 {
        self.setup_minutes + self.run_minutes
    }

    /// 半开区间重叠判定: [a.start, a.end) 与 [b.start, b.end)
    pub fn overlaps(&self, other: &ScheduledJob) -> bool {
        self.scheduled_start < other.scheduled_end && other.scheduled_start < self.scheduled_end
    }

    /// 应用状态转换动作
    ///
    /// 合法则更新状态与 updated_at 并返回 true；非法返回 false 且不产生
    /// 任何变更,由调用方负责拒绝错误的组装。
    pub fn apply_transition(&mut self, action: TransitionAction, now: DateTime<Utc>) -> bool {
        match self.status.apply(action) {
            Some(next) => {
                self.status = next;
                self.updated_at = now;
                true
            }
            None => false,
        }
    }

    /// 平移作业时窗（保持工时不变）
    ///
    /// 结束时间由既有工时重算；仅当作业处于 SCHEDULED/DELAYED 两个
    /// 派生态之间时按新结束时间重算延期标志,执行中的作业保持原状态。
    /// 终态作业不可平移,由调用方先行拒绝。
    pub fn move_to(
        &mut self,
        new_start: DateTime<Utc>,
        new_machine_id: Option<String>,
        now: DateTime<Utc>,
    ) {
        debug_assert!(!self.status.is_terminal(), "终态作业不可平移");

        self.scheduled_start = new_start;
        self.scheduled_end = new_start + Duration::minutes(self.duration_minutes());
        if let Some(machine_id) = new_machine_id {
            self.machine_id = machine_id;
        }
        if matches!(self.status, JobStatus::Scheduled | JobStatus::Delayed) {
            self.status = Self::derive_timing_status(self.scheduled_end, self.due_date);
        }
        self.updated_at = now;
    }
}
