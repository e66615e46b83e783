// ==========================================
// 排产 API 集成测试
// ==========================================
// 职责: 验证四个操作入口的行为与错误口径
// 操作: plan / optimize / reschedule / transition
// ==========================================

mod helpers;

use chrono::Duration;
use helpers::test_data_builder::*;
use workshop_aps::domain::types::{
    ConflictSeverity, ConflictType, JobStatus, MachineStatus, RequestPriority, TransitionAction,
};
use workshop_aps::{ApiError, ScheduleApi};

fn two_machine_plan() -> (ScheduleApi, workshop_aps::PlanOutcome, Vec<workshop_aps::Machine>) {
    let machines = vec![
        create_test_machine("M1", MachineStatus::Operational),
        create_test_machine("M2", MachineStatus::Operational),
    ];
    let snapshot = snapshot_of(
        vec![
            create_test_request("R1", RequestPriority::Normal),
            create_test_request("R2", RequestPriority::Normal),
        ],
        machines.clone(),
        vec![],
    );
    let api = ScheduleApi::with_defaults();
    let outcome = api.plan(&snapshot, base_time()).unwrap();
    (api, outcome, machines)
}

// ==========================================
// 输入校验
// ==========================================

#[test]
fn test_plan_rejects_non_positive_quantity() {
    let snapshot = snapshot_of(
        vec![RequestBuilder::new("R-BAD").quantity(-3).build()],
        vec![create_test_machine("M1", MachineStatus::Operational)],
        vec![],
    );
    let result = ScheduleApi::with_defaults().plan(&snapshot, base_time());
    match result {
        Err(ApiError::InvalidInput(msg)) => {
            assert!(msg.contains("R-BAD"));
            assert!(msg.contains("-3"));
        }
        _ => panic!("Expected InvalidInput"),
    }
}

#[test]
fn test_optimize_rejects_duplicate_request_ids() {
    let snapshot = snapshot_of(
        vec![
            create_test_request("R1", RequestPriority::Normal),
            create_test_request("R1", RequestPriority::Rush),
        ],
        vec![create_test_machine("M1", MachineStatus::Operational)],
        vec![],
    );
    let result = ScheduleApi::with_defaults().optimize(&snapshot, base_time());
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

// ==========================================
// 改排
// ==========================================

#[test]
fn test_reschedule_onto_busy_machine_reports_high_conflict() {
    let (api, outcome, machines) = two_machine_plan();
    // 初排后两单各占一台机,互不冲突
    assert!(outcome.conflicts.is_empty());

    // 把 M2 上的作业硬改到 M1 的同一时窗
    let job_on_m2 = outcome.jobs.iter().find(|j| j.machine_id == "M2").unwrap();
    let rescheduled = api
        .reschedule(
            &outcome.jobs,
            &job_on_m2.job_id,
            base_time(),
            Some("M1"),
            &machines,
            base_time(),
        )
        .unwrap();

    assert_eq!(rescheduled.job.machine_id, "M1");
    assert_eq!(rescheduled.conflicts.len(), 1);
    assert_eq!(rescheduled.conflicts[0].conflict_type, ConflictType::Machine);
    assert_eq!(rescheduled.conflicts[0].severity, ConflictSeverity::High);
    assert_eq!(rescheduled.conflicts[0].resource_id, "M1");
}

#[test]
fn test_reschedule_preserves_duration() {
    let (api, outcome, machines) = two_machine_plan();
    let job = &outcome.jobs[0];
    let duration_before = job.duration_minutes();

    let rescheduled = api
        .reschedule(
            &outcome.jobs,
            &job.job_id,
            base_time() + Duration::minutes(300),
            None,
            &machines,
            base_time(),
        )
        .unwrap();

    assert_eq!(rescheduled.job.duration_minutes(), duration_before);
    assert_eq!(
        rescheduled.job.scheduled_start,
        base_time() + Duration::minutes(300)
    );
}

#[test]
fn test_reschedule_past_due_date_flips_status_to_delayed() {
    let machines = vec![create_test_machine("M1", MachineStatus::Operational)];
    // 55 分钟作业,交期 120 分钟,初排不延期
    let snapshot = snapshot_of(
        vec![RequestBuilder::new("R1").due_in_minutes(120).build()],
        machines.clone(),
        vec![],
    );
    let api = ScheduleApi::with_defaults();
    let outcome = api.plan(&snapshot, base_time()).unwrap();
    assert_eq!(outcome.jobs[0].status, JobStatus::Scheduled);

    // 推迟 2 小时后结束于 175 分钟,超交期
    let rescheduled = api
        .reschedule(
            &outcome.jobs,
            &outcome.jobs[0].job_id,
            base_time() + Duration::minutes(120),
            None,
            &machines,
            base_time(),
        )
        .unwrap();
    assert_eq!(rescheduled.job.status, JobStatus::Delayed);
}

#[test]
fn test_reschedule_unknown_machine_is_invalid_input() {
    let (api, outcome, machines) = two_machine_plan();
    let result = api.reschedule(
        &outcome.jobs,
        &outcome.jobs[0].job_id,
        base_time(),
        Some("M-GHOST"),
        &machines,
        base_time(),
    );
    match result {
        Err(ApiError::InvalidInput(msg)) => assert!(msg.contains("M-GHOST")),
        _ => panic!("Expected InvalidInput"),
    }
}

#[test]
fn test_reschedule_to_offline_machine_is_invalid_input() {
    let machines = vec![
        create_test_machine("M1", MachineStatus::Operational),
        create_test_machine("M-OFF", MachineStatus::Offline),
    ];
    let snapshot = snapshot_of(
        vec![create_test_request("R1", RequestPriority::Normal)],
        machines.clone(),
        vec![],
    );
    let api = ScheduleApi::with_defaults();
    let outcome = api.plan(&snapshot, base_time()).unwrap();

    let result = api.reschedule(
        &outcome.jobs,
        &outcome.jobs[0].job_id,
        base_time(),
        Some("M-OFF"),
        &machines,
        base_time(),
    );
    match result {
        Err(ApiError::InvalidInput(msg)) => assert!(msg.contains("M-OFF")),
        _ => panic!("Expected InvalidInput"),
    }
}

#[test]
fn test_reschedule_terminal_job_is_rejected() {
    let (api, outcome, machines) = two_machine_plan();
    let job_id = outcome.jobs[0].job_id.clone();

    // 取消后即终态
    let cancelled = api
        .transition(&outcome.jobs, &job_id, TransitionAction::Cancel, base_time())
        .unwrap();
    let result = api.reschedule(
        &cancelled.jobs,
        &job_id,
        base_time() + Duration::minutes(60),
        None,
        &machines,
        base_time(),
    );
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

// ==========================================
// 状态转换
// ==========================================

#[test]
fn test_transition_start_then_complete() {
    let (api, outcome, _machines) = two_machine_plan();
    let job_id = outcome.jobs[0].job_id.clone();

    let started = api
        .transition(&outcome.jobs, &job_id, TransitionAction::Start, base_time())
        .unwrap();
    assert_eq!(started.job.status, JobStatus::InProgress);

    let completed = api
        .transition(&started.jobs, &job_id, TransitionAction::Complete, base_time())
        .unwrap();
    assert_eq!(completed.job.status, JobStatus::Completed);
}

#[test]
fn test_transition_delay_only_from_scheduled() {
    let (api, outcome, _machines) = two_machine_plan();
    let job_id = outcome.jobs[0].job_id.clone();

    let delayed = api
        .transition(&outcome.jobs, &job_id, TransitionAction::Delay, base_time())
        .unwrap();
    assert_eq!(delayed.job.status, JobStatus::Delayed);

    // 已延期作业不允许再次 DELAY
    let again = api.transition(&delayed.jobs, &job_id, TransitionAction::Delay, base_time());
    match again {
        Err(ApiError::InvalidStateTransition { from, to }) => {
            assert_eq!(from, "DELAYED");
            assert_eq!(to, "DELAYED");
        }
        _ => panic!("Expected InvalidStateTransition"),
    }
}

#[test]
fn test_transition_on_completed_job_is_rejected() {
    let (api, outcome, _machines) = two_machine_plan();
    let job_id = outcome.jobs[0].job_id.clone();

    let started = api
        .transition(&outcome.jobs, &job_id, TransitionAction::Start, base_time())
        .unwrap();
    let completed = api
        .transition(&started.jobs, &job_id, TransitionAction::Complete, base_time())
        .unwrap();

    for action in [
        TransitionAction::Start,
        TransitionAction::Delay,
        TransitionAction::Cancel,
    ] {
        let result = api.transition(&completed.jobs, &job_id, action, base_time());
        assert!(
            matches!(result, Err(ApiError::InvalidStateTransition { .. })),
            "终态作业不允许 {:?}",
            action
        );
    }
}

#[test]
fn test_transition_does_not_touch_windows() {
    let (api, outcome, _machines) = two_machine_plan();
    let job_id = outcome.jobs[0].job_id.clone();
    let start_before = outcome.jobs[0].scheduled_start;
    let end_before = outcome.jobs[0].scheduled_end;

    let started = api
        .transition(&outcome.jobs, &job_id, TransitionAction::Start, base_time())
        .unwrap();
    assert_eq!(started.job.scheduled_start, start_before);
    assert_eq!(started.job.scheduled_end, end_before);
}

#[test]
fn test_transition_unknown_job_is_not_found() {
    let (api, outcome, _machines) = two_machine_plan();
    let result = api.transition(
        &outcome.jobs,
        "JOB-GHOST",
        TransitionAction::Start,
        base_time(),
    );
    match result {
        Err(ApiError::NotFound(msg)) => assert!(msg.contains("JOB-GHOST")),
        _ => panic!("Expected NotFound"),
    }
}
