// ==========================================
// 车间生产排产系统 - 优化引擎
// ==========================================
// 红线: 优化结果整体取代旧作业清单,不做合并
// 红线: 幂等 —— 同一快照重复优化,输出完全一致,
//       任何选择点都不允许随机性
// ==========================================
// 职责: 聚类重排 + 负载均衡选机台 + 重跑落位 + 重检冲突
// 口径: 优化用"最低累计负载"换掉常规排产的"最早空闲",
//       以牺牲最早开工换取机台均衡,这是有意差异
// ==========================================

use crate::domain::conflict::{PlanWarning, ScheduleConflict};
use crate::domain::job::ScheduledJob;
use crate::domain::request::ProductionRequest;
use crate::domain::resource::Machine;
use crate::domain::snapshot::ScheduleSnapshot;
use crate::engine::capability::CapabilityMatrix;
use crate::engine::clock::ResourceClock;
use crate::engine::conflict_detector::ConflictDetector;
use crate::engine::duration::{DurationError, DurationEstimator};
use crate::engine::planner::AssignmentPlanner;
use crate::engine::priority::RequestSorter;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{info, instrument};

// ==========================================
// ScheduleOptimizer - 优化引擎
// ==========================================
pub struct ScheduleOptimizer {
    // 无状态引擎,不需要注入依赖
}

/// 优化管线结果
#[derive(Debug, Clone)]
pub struct OptimizeFillResult {
    pub jobs: Vec<ScheduledJob>,
    pub conflicts: Vec<ScheduleConflict>,
    pub warnings: Vec<PlanWarning>,
    pub conflicts_before: usize, // 基线管线冲突数
    pub conflicts_after: usize,  // 优化后冲突数
    pub conflicts_resolved: i64, // before - after (可为负)
}

impl ScheduleOptimizer {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 ScheduleOptimizer 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 完整优化管线
    ///
    /// 步骤:
    /// 1) 基线: 按常规排产口径跑一遍,取冲突基数
    /// 2) 重排: 零件类型聚类 + 优先级
    /// 3) 负载均衡: 按累计负载最低为每个请求选建议机台
    /// 4) 重跑落位管线（采纳建议,时窗仍由机台时钟给出）
    /// 5) 重检冲突,报告差值 before - after
    ///
    /// # 参数
    /// - `snapshot`: 输入快照
    /// - `capability`: 产能判定
    /// - `estimator`: 工时估算引擎
    /// - `now`: 运行基准时间
    #[instrument(skip_all, fields(
        requests_count = snapshot.requests.len(),
        machines_count = snapshot.machines.len()
    ))]
    pub fn optimize(
        &self,
        snapshot: &ScheduleSnapshot,
        capability: &dyn CapabilityMatrix,
        estimator: &DurationEstimator,
        now: DateTime<Utc>,
    ) -> Result<OptimizeFillResult, DurationError> {
        let sorter = RequestSorter::new();
        let planner = AssignmentPlanner::new();
        let detector = ConflictDetector::new();

        // 1. 基线管线: 常规排产口径,只为取冲突基数
        let baseline_order = sorter.sort_for_plan(snapshot.requests.clone());
        let mut baseline_clock = ResourceClock::for_machines(&snapshot.machines, now);
        let baseline = planner.fill(
            &baseline_order,
            &snapshot.machines,
            &snapshot.operators,
            capability,
            estimator,
            &mut baseline_clock,
            None,
            now,
        )?;
        let conflicts_before = detector.detect(&baseline.jobs).len();

        // 2. 聚类重排: 同类零件相邻,压缩换型总量
        let optimized_order = sorter.sort_for_optimize(snapshot.requests.clone());

        // 3. 负载均衡选机台
        let preferences =
            self.balance_pass(&optimized_order, &snapshot.machines, capability, estimator)?;

        // 4. 重跑落位管线（建议机台 + 机台时钟共同决定时窗）
        let mut clock = ResourceClock::for_machines(&snapshot.machines, now);
        let fill = planner.fill(
            &optimized_order,
            &snapshot.machines,
            &snapshot.operators,
            capability,
            estimator,
            &mut clock,
            Some(&preferences),
            now,
        )?;

        // 5. 重检冲突并报告差值
        let conflicts = detector.detect(&fill.jobs);
        let conflicts_after = conflicts.len();
        let conflicts_resolved = conflicts_before as i64 - conflicts_after as i64;

        info!(
            conflicts_before,
            conflicts_after, conflicts_resolved, "优化管线完成"
        );

        Ok(OptimizeFillResult {
            jobs: fill.jobs,
            conflicts,
            warnings: fill.warnings,
            conflicts_before,
            conflicts_after,
            conflicts_resolved,
        })
    }

    // ==========================================
    // 负载均衡
    // ==========================================

    /// 为每个请求按"累计负载最低"选建议机台
    ///
    /// 累计负载以本轮分钟数计,从零起算;同负载按机台清单顺序
    /// 首个命中。无可选机台的请求不给建议,由落位引擎统一告警。
    ///
    /// # 返回
    /// request_id → machine_id 建议映射
    fn balance_pass(
        &self,
        requests: &[ProductionRequest],
        machines: &[Machine],
        capability: &dyn CapabilityMatrix,
        estimator: &DurationEstimator,
    ) -> Result<HashMap<String, String>, DurationError> {
        let mut cumulative_load: HashMap<String, i64> = HashMap::new();
        let mut preferences = HashMap::new();

        for request in requests {
            let capable: Vec<&Machine> = machines
                .iter()
                .filter(|m| m.is_operational())
                .filter(|m| capability.is_capable(m, request.part_type.as_deref()))
                .collect();
            if capable.is_empty() {
                continue;
            }

            let estimate = estimator.estimate(request.part_type.as_deref(), request.quantity)?;

            // 最低累计负载(严格更低才换人)
            let mut best = (
                capable[0],
                cumulative_load
                    .get(&capable[0].machine_id)
                    .copied()
                    .unwrap_or(0),
            );
            for machine in &capable[1..] {
                let load = cumulative_load
                    .get(&machine.machine_id)
                    .copied()
                    .unwrap_or(0);
                if load < best.1 {
                    best = (machine, load);
                }
            }

            preferences.insert(request.request_id.clone(), best.0.machine_id.clone());
            *cumulative_load.entry(best.0.machine_id.clone()).or_insert(0) +=
                estimate.total_minutes();
        }

        Ok(preferences)
    }
}

impl Default for ScheduleOptimizer {
    fn default() -> Self {
        Self::new()
    }
}
