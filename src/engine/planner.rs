// ==========================================
// 车间生产排产系统 - 贪心落位引擎
// ==========================================
// 红线: 无可用机台只跳过并告警,不使运行失败
// 红线: 全链路确定性 —— 机台遍历按清单顺序,同空闲时间首个命中
// ==========================================
// 职责: 已排序请求 → 排产作业
// 输入: 排序后请求 + 机台/操作工清单 + 机台时钟
// 输出: 作业列表 + 跳过告警,时钟随落位推进
// ==========================================

use crate::domain::conflict::PlanWarning;
use crate::domain::job::ScheduledJob;
use crate::domain::request::ProductionRequest;
use crate::domain::resource::{Machine, Operator};
use crate::engine::capability::CapabilityMatrix;
use crate::engine::clock::ResourceClock;
use crate::engine::duration::{DurationError, DurationEstimator};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

// ==========================================
// AssignmentPlanner - 贪心落位引擎
// ==========================================
pub struct AssignmentPlanner {
    // 无状态引擎,不需要注入依赖
}

/// 单次填充结果
#[derive(Debug, Clone)]
pub struct PlanFillResult {
    pub jobs: Vec<ScheduledJob>,
    pub warnings: Vec<PlanWarning>,
}

impl AssignmentPlanner {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 AssignmentPlanner 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 按序落位请求
    ///
    /// 规则:
    /// 1) 仅 OPERATIONAL 且产能匹配的机台可选
    /// 2) 无可选机台 → 跳过该请求并记录告警
    /// 3) 有优化建议且建议机台可选 → 采纳建议;否则取最早空闲机台
    ///    (同空闲时间按机台清单顺序首个命中)
    /// 4) start = 机台空闲时间, end = start + 换型 + 加工
    /// 5) 结束晚于交货期限 → 状态派生为 DELAYED
    /// 6) 操作工取当前累计负载最低者(同负载按清单顺序),无在岗则不分配
    /// 7) 产出作业并推进机台时钟
    ///
    /// # 参数
    /// - `requests`: 已按目标口径排序的请求
    /// - `machines`: 机台清单（遍历顺序即决胜顺序）
    /// - `operators`: 操作工清单
    /// - `capability`: 产能判定
    /// - `estimator`: 工时估算引擎
    /// - `clock`: 机台时钟（会被推进）
    /// - `preferences`: 优化建议 (request_id → machine_id),常规排产传 None
    /// - `now`: 运行基准时间
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(
        requests_count = requests.len(),
        machines_count = machines.len(),
        operators_count = operators.len()
    ))]
    pub fn fill(
        &self,
        requests: &[ProductionRequest],
        machines: &[Machine],
        operators: &[Operator],
        capability: &dyn CapabilityMatrix,
        estimator: &DurationEstimator,
        clock: &mut ResourceClock,
        preferences: Option<&HashMap<String, String>>,
        now: DateTime<Utc>,
    ) -> Result<PlanFillResult, DurationError> {
        let mut jobs = Vec::new();
        let mut warnings = Vec::new();

        // 操作工累计负载（分钟,本次填充口径）
        let mut operator_load: HashMap<String, i64> = HashMap::new();

        for request in requests {
            // 1. 可选机台: OPERATIONAL + 产能匹配 + 在钟
            let candidates: Vec<(&Machine, DateTime<Utc>)> = machines
                .iter()
                .filter(|m| m.is_operational())
                .filter(|m| capability.is_capable(m, request.part_type.as_deref()))
                .filter_map(|m| clock.peek(&m.machine_id).map(|free| (m, free)))
                .collect();

            // 2. 无可选机台 → 跳过并告警
            if candidates.is_empty() {
                warn!(
                    request_id = %request.request_id,
                    part_type = request.part_type.as_deref().unwrap_or("<未指定>"),
                    "请求无可用产能机台,跳过"
                );
                warnings.push(PlanWarning::no_capable_machine(
                    &request.request_id,
                    request.part_type.as_deref(),
                ));
                continue;
            }

            // 3. 选机台: 优化建议优先,否则最早空闲
            let preferred = preferences
                .and_then(|prefs| prefs.get(&request.request_id))
                .and_then(|machine_id| {
                    candidates
                        .iter()
                        .find(|(m, _)| &m.machine_id == machine_id)
                        .copied()
                });

            let (machine, start, rule) = match preferred {
                Some((m, free)) => (
                    m,
                    free,
                    format!("LOAD_BALANCE: 采纳优化建议机台 {}", m.machine_id),
                ),
                None => {
                    let (m, free) = Self::earliest_free(&candidates);
                    (
                        m,
                        free,
                        format!("EARLIEST_FREE: 机台 {} 最早空闲", m.machine_id),
                    )
                }
            };

            // 4. 工时估算（类型未知走兜底常数,数量非法向上拒绝）
            let estimate =
                estimator.estimate(request.part_type.as_deref(), request.quantity)?;

            // 5. 操作工: 在岗且累计负载最低
            let operator_id = Self::least_loaded_operator(operators, &operator_load);
            let assign_reason = match &operator_id {
                Some(op) => format!("{}; 操作工 {} 负载最低", rule, op),
                None => rule,
            };

            // 6. 产出作业并推进时钟
            let job = ScheduledJob::create(
                request,
                &machine.machine_id,
                operator_id.clone(),
                start,
                estimate.setup_minutes,
                estimate.run_minutes,
                assign_reason,
                now,
            );
            clock.reserve(&machine.machine_id, job.scheduled_start, job.scheduled_end);
            if let Some(op) = operator_id {
                *operator_load.entry(op).or_insert(0) += estimate.total_minutes();
            }

            debug!(
                request_id = %request.request_id,
                job_id = %job.job_id,
                machine_id = %job.machine_id,
                status = %job.status,
                "请求落位"
            );
            jobs.push(job);
        }

        Ok(PlanFillResult { jobs, warnings })
    }

    // ==========================================
    // 选择规则
    // ==========================================

    /// 最早空闲机台（严格更早才换人,同空闲时间首个命中）
    fn earliest_free<'a>(
        candidates: &[(&'a Machine, DateTime<Utc>)],
    ) -> (&'a Machine, DateTime<Utc>) {
        let mut best = candidates[0];
        for &(machine, free) in &candidates[1..] {
            if free < best.1 {
                best = (machine, free);
            }
        }
        best
    }

    /// 累计负载最低的在岗操作工（严格更低才换人,同负载按清单顺序）
    fn least_loaded_operator(
        operators: &[Operator],
        operator_load: &HashMap<String, i64>,
    ) -> Option<String> {
        let mut best: Option<(&Operator, i64)> = None;
        for operator in operators.iter().filter(|o| o.active) {
            let load = operator_load
                .get(&operator.operator_id)
                .copied()
                .unwrap_or(0);
            match best {
                Some((_, best_load)) if load >= best_load => {}
                _ => best = Some((operator, load)),
            }
        }
        best.map(|(operator, _)| operator.operator_id.clone())
    }
}

impl Default for AssignmentPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{JobStatus, MachineStatus, RequestPriority};
    use crate::engine::capability::UniversalCapability;
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
    }

    fn request(id: &str, quantity: i32, due_offset_minutes: i64) -> ProductionRequest {
        ProductionRequest {
            request_id: id.to_string(),
            customer_id: "CUST-001".to_string(),
            part_id: None,
            part_type: None,
            quantity,
            due_date: base_time() + Duration::minutes(due_offset_minutes),
            priority: RequestPriority::Normal,
        }
    }

    fn machine(id: &str, status: MachineStatus) -> Machine {
        Machine {
            machine_id: id.to_string(),
            machine_type: "CNC".to_string(),
            status,
        }
    }

    fn operator(id: &str, active: bool) -> Operator {
        Operator {
            operator_id: id.to_string(),
            name: format!("工{}", id),
            active,
        }
    }

    fn fill(
        requests: &[ProductionRequest],
        machines: &[Machine],
        operators: &[Operator],
    ) -> PlanFillResult {
        let planner = AssignmentPlanner::new();
        let estimator = DurationEstimator::default();
        let mut clock = ResourceClock::for_machines(machines, base_time());
        planner
            .fill(
                requests,
                machines,
                operators,
                &UniversalCapability,
                &estimator,
                &mut clock,
                None,
                base_time(),
            )
            .unwrap()
    }

    #[test]
    fn test_single_machine_jobs_are_back_to_back() {
        // 兜底工时: 每单 20 + 10*2 = 40 分钟
        let requests = vec![request("R1", 2, 10_000), request("R2", 2, 10_000)];
        let machines = vec![machine("M1", MachineStatus::Operational)];

        let result = fill(&requests, &machines, &[]);
        assert_eq!(result.jobs.len(), 2);
        assert!(result.warnings.is_empty());

        let first = &result.jobs[0];
        let second = &result.jobs[1];
        assert_eq!(first.machine_id, "M1");
        assert_eq!(second.machine_id, "M1");
        assert_eq!(
            second.scheduled_start, first.scheduled_end,
            "同机台作业必须首尾相接,不得重叠"
        );
    }

    #[test]
    fn test_no_operational_machine_skips_with_warning() {
        let requests = vec![request("R1", 2, 10_000)];
        let machines = vec![machine("M1", MachineStatus::Maintenance)];

        let result = fill(&requests, &machines, &[]);
        assert!(result.jobs.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].reason.starts_with("NO_CAPABLE_MACHINE"));
        assert_eq!(result.warnings[0].request_id, "R1");
    }

    #[test]
    fn test_skip_does_not_abort_rest_of_run() {
        let requests = vec![request("R1", 2, 10_000), request("R2", 2, 10_000)];
        let capability = crate::engine::capability::TagCapabilityMatrix::new()
            .with_rule("EXOTIC", ["NONE"]);
        let mut restricted = request("R0", 1, 10_000);
        restricted.part_type = Some("EXOTIC".to_string());

        let all = vec![restricted, requests[0].clone(), requests[1].clone()];
        let machines = vec![machine("M1", MachineStatus::Operational)];
        let planner = AssignmentPlanner::new();
        let estimator = DurationEstimator::default();
        let mut clock = ResourceClock::for_machines(&machines, base_time());

        let result = planner
            .fill(
                &all,
                &machines,
                &[],
                &capability,
                &estimator,
                &mut clock,
                None,
                base_time(),
            )
            .unwrap();

        assert_eq!(result.jobs.len(), 2, "其余请求必须照常落位");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_earliest_free_tie_takes_first_machine() {
        let requests = vec![request("R1", 2, 10_000)];
        let machines = vec![
            machine("M1", MachineStatus::Operational),
            machine("M2", MachineStatus::Operational),
        ];

        let result = fill(&requests, &machines, &[]);
        assert_eq!(result.jobs[0].machine_id, "M1", "同空闲时间首个命中");
    }

    #[test]
    fn test_preference_overrides_earliest_free() {
        let requests = vec![request("R1", 2, 10_000)];
        let machines = vec![
            machine("M1", MachineStatus::Operational),
            machine("M2", MachineStatus::Operational),
        ];
        let planner = AssignmentPlanner::new();
        let estimator = DurationEstimator::default();
        let mut clock = ResourceClock::for_machines(&machines, base_time());
        let mut preferences = HashMap::new();
        preferences.insert("R1".to_string(), "M2".to_string());

        let result = planner
            .fill(
                &requests,
                &machines,
                &[],
                &UniversalCapability,
                &estimator,
                &mut clock,
                Some(&preferences),
                base_time(),
            )
            .unwrap();

        assert_eq!(result.jobs[0].machine_id, "M2");
        assert!(result.jobs[0]
            .assign_reason
            .as_deref()
            .unwrap()
            .starts_with("LOAD_BALANCE"));
    }

    #[test]
    fn test_operator_assignment_is_least_loaded() {
        let requests = vec![
            request("R1", 2, 10_000),
            request("R2", 2, 10_000),
            request("R3", 2, 10_000),
        ];
        let machines = vec![
            machine("M1", MachineStatus::Operational),
            machine("M2", MachineStatus::Operational),
        ];
        let operators = vec![operator("OP1", true), operator("OP2", true)];

        let result = fill(&requests, &machines, &operators);
        let assigned: Vec<&str> = result
            .jobs
            .iter()
            .map(|j| j.operator_id.as_deref().unwrap())
            .collect();

        // 负载均为 0 → OP1;随后 OP2;再回到 OP1
        assert_eq!(assigned, vec!["OP1", "OP2", "OP1"]);
    }

    #[test]
    fn test_inactive_operators_are_not_assigned() {
        let requests = vec![request("R1", 2, 10_000)];
        let machines = vec![machine("M1", MachineStatus::Operational)];
        let operators = vec![operator("OP1", false)];

        let result = fill(&requests, &machines, &operators);
        assert_eq!(result.jobs[0].operator_id, None);
    }

    #[test]
    fn test_delayed_status_derived_from_due_date() {
        // 工时 40 分钟,期限只给 30 分钟 → DELAYED
        let requests = vec![request("R1", 2, 30)];
        let machines = vec![machine("M1", MachineStatus::Operational)];

        let result = fill(&requests, &machines, &[]);
        assert_eq!(result.jobs[0].status, JobStatus::Delayed);
    }
}
