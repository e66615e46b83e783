// Small dev utility: run a plan + optimize round over a built-in demo
// snapshot and print both outcomes as pretty JSON.
//
// Usage:
//   cargo run --bin plan_preview
//
// This is intentionally lightweight and does not require any external data.

use std::sync::Arc;

use chrono::{Duration, Utc};
use workshop_aps::{
    InMemorySnapshotSource, Machine, Operator, ProductionRequest, ScheduleApi, ScheduleSession,
    TagCapabilityMatrix,
};
use workshop_aps::{DurationProfile, MachineStatus, RequestPriority};

fn demo_requests() -> Vec<ProductionRequest> {
    let now = Utc::now();
    vec![
        ProductionRequest {
            request_id: "REQ-1001".to_string(),
            customer_id: "CUST-A".to_string(),
            part_id: Some("PART-77".to_string()),
            part_type: Some("STANDARD".to_string()),
            quantity: 12,
            due_date: now + Duration::hours(8),
            priority: RequestPriority::Normal,
        },
        ProductionRequest {
            request_id: "REQ-1002".to_string(),
            customer_id: "CUST-B".to_string(),
            part_id: Some("PART-12".to_string()),
            part_type: Some("PRECISION".to_string()),
            quantity: 3,
            due_date: now + Duration::hours(4),
            priority: RequestPriority::Rush,
        },
        ProductionRequest {
            request_id: "REQ-1003".to_string(),
            customer_id: "CUST-A".to_string(),
            part_id: Some("PART-90".to_string()),
            part_type: Some("STANDARD".to_string()),
            quantity: 6,
            due_date: now + Duration::hours(6),
            priority: RequestPriority::High,
        },
        // 无机台可做的零件类型,演示跳过告警
        ProductionRequest {
            request_id: "REQ-1004".to_string(),
            customer_id: "CUST-C".to_string(),
            part_id: Some("PART-EX".to_string()),
            part_type: Some("EXOTIC".to_string()),
            quantity: 1,
            due_date: now + Duration::hours(12),
            priority: RequestPriority::Low,
        },
    ]
}

fn demo_machines() -> Vec<Machine> {
    vec![
        Machine {
            machine_id: "M-01".to_string(),
            machine_type: "CNC".to_string(),
            status: MachineStatus::Operational,
        },
        Machine {
            machine_id: "M-02".to_string(),
            machine_type: "CNC".to_string(),
            status: MachineStatus::Operational,
        },
        Machine {
            machine_id: "M-03".to_string(),
            machine_type: "LATHE".to_string(),
            status: MachineStatus::Maintenance,
        },
    ]
}

fn demo_operators() -> Vec<Operator> {
    vec![
        Operator {
            operator_id: "OP-01".to_string(),
            name: "张师傅".to_string(),
            active: true,
        },
        Operator {
            operator_id: "OP-02".to_string(),
            name: "李师傅".to_string(),
            active: true,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    workshop_aps::logging::init();

    // EXOTIC 只允许 5-AXIS 机台,演示快照里没有
    let capability = TagCapabilityMatrix::new().with_rule("EXOTIC", ["5-AXIS"]);
    let estimator = workshop_aps::DurationEstimator::new(DurationProfile::default());
    let api = ScheduleApi::new(estimator, Arc::new(capability));

    let source = Arc::new(InMemorySnapshotSource::new(
        demo_requests(),
        demo_machines(),
        demo_operators(),
    ));
    let session = ScheduleSession::new("DEMO-FLOOR", api, source);

    let plan = session.plan().await?;
    println!("=== plan ===");
    println!("{}", serde_json::to_string_pretty(&plan)?);

    let optimized = session.optimize().await?;
    println!("=== optimize ===");
    println!("{}", serde_json::to_string_pretty(&optimized)?);

    Ok(())
}
