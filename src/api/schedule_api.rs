// ==========================================
// 车间生产排产系统 - 排产 API
// ==========================================
// 职责: 封装排产四操作(plan/optimize/reschedule/transition),
//       组装引擎管线并把引擎错误翻译为 API 错误
// 红线: 无效输入必须在触碰任何排产状态之前被拒绝
// 红线: 基准时间由调用方显式传入,本层不取 Utc::now()
// 架构: API 层 → 引擎层 (无状态引擎组合)
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::SnapshotValidator;
use crate::domain::conflict::{PlanWarning, ScheduleConflict};
use crate::domain::job::ScheduledJob;
use crate::domain::resource::Machine;
use crate::domain::snapshot::ScheduleSnapshot;
use crate::domain::types::TransitionAction;
use crate::engine::{
    AssignmentPlanner, CapabilityMatrix, ConflictDetector, DurationEstimator, RequestSorter,
    ResourceClock, ScheduleOptimizer, UniversalCapability,
};

// ==========================================
// 操作结果 DTO
// ==========================================

/// 排产操作结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub jobs: Vec<ScheduledJob>,          // 全量作业清单
    pub conflicts: Vec<ScheduleConflict>, // 全量冲突清单
    pub warnings: Vec<PlanWarning>,       // 跳过请求的告警
    pub planned_count: usize,             // 落位成功数
    pub skipped_count: usize,             // 跳过数
}

/// 优化操作结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeOutcome {
    pub jobs: Vec<ScheduledJob>,
    pub conflicts: Vec<ScheduleConflict>,
    pub warnings: Vec<PlanWarning>,
    pub conflicts_before: usize, // 基线管线冲突数
    pub conflicts_after: usize,  // 优化后冲突数
    pub conflicts_resolved: i64, // before - after (可为负)
}

/// 改排操作结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleOutcome {
    pub job: ScheduledJob,                // 改排后的作业
    pub jobs: Vec<ScheduledJob>,          // 改排后的全量作业清单
    pub conflicts: Vec<ScheduleConflict>, // 全量重检结果
}

/// 状态转换操作结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub job: ScheduledJob,       // 转换后的作业
    pub jobs: Vec<ScheduledJob>, // 转换后的全量作业清单
}

// ==========================================
// ScheduleApi - 排产 API
// ==========================================

/// 排产API
///
/// 职责:
/// 1. plan: 校验快照 → 排序 → 落位 → 检冲突
/// 2. optimize: 聚类重排 + 负载均衡 + 重检,报告冲突差值
/// 3. reschedule: 单作业改时窗/改机台,全量重检冲突
/// 4. transition: 作业状态机转换,不重算冲突
pub struct ScheduleApi {
    validator: SnapshotValidator,
    sorter: RequestSorter,
    planner: AssignmentPlanner,
    detector: ConflictDetector,
    optimizer: ScheduleOptimizer,
    estimator: DurationEstimator,
    capability: Arc<dyn CapabilityMatrix>,
}

impl ScheduleApi {
    /// 创建新的ScheduleApi实例
    ///
    /// # 参数
    /// - `estimator`: 工时估算引擎(携带工时配置)
    /// - `capability`: 产能判定实现
    pub fn new(estimator: DurationEstimator, capability: Arc<dyn CapabilityMatrix>) -> Self {
        Self {
            validator: SnapshotValidator::new(),
            sorter: RequestSorter::new(),
            planner: AssignmentPlanner::new(),
            detector: ConflictDetector::new(),
            optimizer: ScheduleOptimizer::new(),
            estimator,
            capability,
        }
    }

    /// 按内置工时配置与"全能机台"口径创建实例
    pub fn with_defaults() -> Self {
        Self::new(DurationEstimator::default(), Arc::new(UniversalCapability))
    }

    // ==========================================
    // 操作 1: 排产
    // ==========================================

    /// 对输入快照做一轮完整排产
    ///
    /// 管线: 校验 → 优先级排序 → 贪心落位 → 冲突检测
    ///
    /// # 参数
    /// - `snapshot`: 输入快照(请求/机台/操作工)
    /// - `now`: 运行基准时间,机台时钟从此刻起算
    ///
    /// # 返回
    /// - Ok(PlanOutcome): 作业/冲突/告警全量清单
    /// - Err(ApiError::InvalidInput): 快照校验失败,未触碰任何排产状态
    #[instrument(skip_all, fields(requests_count = snapshot.requests.len()))]
    pub fn plan(&self, snapshot: &ScheduleSnapshot, now: DateTime<Utc>) -> ApiResult<PlanOutcome> {
        let _perf = crate::perf::PerfGuard::new("api.plan");
        self.validator.validate(snapshot)?;

        // 1. 优先级排序
        let ordered = self.sorter.sort_for_plan(snapshot.requests.clone());

        // 2. 贪心落位
        let mut clock = ResourceClock::for_machines(&snapshot.machines, now);
        let fill = self.planner.fill(
            &ordered,
            &snapshot.machines,
            &snapshot.operators,
            self.capability.as_ref(),
            &self.estimator,
            &mut clock,
            None,
            now,
        )?;

        // 3. 冲突检测
        let conflicts = self.detector.detect(&fill.jobs);

        let outcome = PlanOutcome {
            planned_count: fill.jobs.len(),
            skipped_count: fill.warnings.len(),
            jobs: fill.jobs,
            conflicts,
            warnings: fill.warnings,
        };
        info!(
            planned = outcome.planned_count,
            skipped = outcome.skipped_count,
            conflicts = outcome.conflicts.len(),
            "排产完成"
        );
        Ok(outcome)
    }

    // ==========================================
    // 操作 2: 优化
    // ==========================================

    /// 对输入快照做一轮优化排产
    ///
    /// 管线: 校验 → 基线排产取冲突基数 → 聚类重排 →
    ///       负载均衡选机台 → 重跑落位 → 重检冲突
    ///
    /// # 参数
    /// - `snapshot`: 输入快照
    /// - `now`: 运行基准时间
    ///
    /// # 返回
    /// - Ok(OptimizeOutcome): 优化后全量清单 + 冲突差值报告
    #[instrument(skip_all, fields(requests_count = snapshot.requests.len()))]
    pub fn optimize(
        &self,
        snapshot: &ScheduleSnapshot,
        now: DateTime<Utc>,
    ) -> ApiResult<OptimizeOutcome> {
        let _perf = crate::perf::PerfGuard::new("api.optimize");
        self.validator.validate(snapshot)?;

        let result =
            self.optimizer
                .optimize(snapshot, self.capability.as_ref(), &self.estimator, now)?;

        info!(
            conflicts_before = result.conflicts_before,
            conflicts_after = result.conflicts_after,
            conflicts_resolved = result.conflicts_resolved,
            "优化完成"
        );
        Ok(OptimizeOutcome {
            jobs: result.jobs,
            conflicts: result.conflicts,
            warnings: result.warnings,
            conflicts_before: result.conflicts_before,
            conflicts_after: result.conflicts_after,
            conflicts_resolved: result.conflicts_resolved,
        })
    }

    // ==========================================
    // 操作 3: 改排
    // ==========================================

    /// 改排单个作业的时窗,可同时改机台
    ///
    /// 时长保持不变;状态按新时窗重推(仅限 SCHEDULED/DELAYED,
    /// IN_PROGRESS 保持原状态);改排后对全量作业重检冲突。
    ///
    /// # 参数
    /// - `jobs`: 当前全量作业清单
    /// - `job_id`: 目标作业
    /// - `new_start`: 新开工时刻
    /// - `new_machine_id`: 可选的目标机台
    /// - `machines`: 机台清单(校验目标机台用)
    /// - `now`: 运行基准时间(盖 updated_at)
    ///
    /// # 返回
    /// - Ok(RescheduleOutcome): 改排后的作业 + 全量清单 + 全量重检结果
    /// - Err(ApiError::NotFound): 作业不存在
    /// - Err(ApiError::InvalidInput): 终态作业 / 目标机台不存在或非运行状态
    #[instrument(skip_all, fields(job_id = %job_id))]
    pub fn reschedule(
        &self,
        jobs: &[ScheduledJob],
        job_id: &str,
        new_start: DateTime<Utc>,
        new_machine_id: Option<&str>,
        machines: &[Machine],
        now: DateTime<Utc>,
    ) -> ApiResult<RescheduleOutcome> {
        let _perf = crate::perf::PerfGuard::new("api.reschedule");

        // 1. 定位目标作业
        let position = jobs
            .iter()
            .position(|j| j.job_id == job_id)
            .ok_or_else(|| ApiError::NotFound(format!("作业 {} 不存在", job_id)))?;
        if jobs[position].status.is_terminal() {
            return Err(ApiError::InvalidInput(format!(
                "作业 {} 已处于终态 {},不允许改排",
                job_id,
                jobs[position].status.as_str()
            )));
        }

        // 2. 校验目标机台(若要求换机台)
        if let Some(target) = new_machine_id {
            let machine = machines
                .iter()
                .find(|m| m.machine_id == target)
                .ok_or_else(|| {
                    ApiError::InvalidInput(format!("目标机台 {} 不存在", target))
                })?;
            if !machine.is_operational() {
                return Err(ApiError::InvalidInput(format!(
                    "目标机台 {} 非运行状态,不允许改排到该机台",
                    target
                )));
            }
        }

        // 3. 移动时窗并全量重检
        let mut updated: Vec<ScheduledJob> = jobs.to_vec();
        updated[position].move_to(new_start, new_machine_id.map(str::to_string), now);
        let conflicts = self.detector.detect(&updated);

        info!(
            job_id = %job_id,
            conflicts = conflicts.len(),
            "改排完成"
        );
        Ok(RescheduleOutcome {
            job: updated[position].clone(),
            jobs: updated,
            conflicts,
        })
    }

    // ==========================================
    // 操作 4: 状态转换
    // ==========================================

    /// 作业状态机转换
    ///
    /// 合法路径之外的转换一律拒绝;转换不改时窗,也不重算冲突。
    ///
    /// # 参数
    /// - `jobs`: 当前全量作业清单
    /// - `job_id`: 目标作业
    /// - `action`: 转换动作(START/COMPLETE/DELAY/CANCEL)
    /// - `now`: 运行基准时间(盖 updated_at)
    ///
    /// # 返回
    /// - Ok(TransitionOutcome): 转换后的作业 + 全量清单
    /// - Err(ApiError::NotFound): 作业不存在
    /// - Err(ApiError::InvalidStateTransition): 非法转换,带 from/to
    #[instrument(skip_all, fields(job_id = %job_id, action = %action))]
    pub fn transition(
        &self,
        jobs: &[ScheduledJob],
        job_id: &str,
        action: TransitionAction,
        now: DateTime<Utc>,
    ) -> ApiResult<TransitionOutcome> {
        let _perf = crate::perf::PerfGuard::new("api.transition");

        let position = jobs
            .iter()
            .position(|j| j.job_id == job_id)
            .ok_or_else(|| ApiError::NotFound(format!("作业 {} 不存在", job_id)))?;

        if jobs[position].status.apply(action).is_none() {
            return Err(ApiError::InvalidStateTransition {
                from: jobs[position].status.as_str().to_string(),
                to: action.target_status().as_str().to_string(),
            });
        }

        let mut updated: Vec<ScheduledJob> = jobs.to_vec();
        updated[position].apply_transition(action, now);

        info!(
            job_id = %job_id,
            action = %action,
            new_status = updated[position].status.as_str(),
            "状态转换完成"
        );
        Ok(TransitionOutcome {
            job: updated[position].clone(),
            jobs: updated,
        })
    }
}

impl Default for ScheduleApi {
    fn default() -> Self {
        Self::with_defaults()
    }
}
