// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{DateTime, Duration, TimeZone, Utc};
use workshop_aps::domain::types::{JobStatus, MachineStatus, RequestPriority};
use workshop_aps::{Machine, Operator, ProductionRequest, ScheduledJob, ScheduleSnapshot};

/// 所有集成测试共用的基准时刻
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
}

// ==========================================
// ProductionRequest 构建器
// ==========================================

pub struct RequestBuilder {
    request_id: String,
    customer_id: String,
    part_id: Option<String>,
    part_type: Option<String>,
    quantity: i32,
    due_date: DateTime<Utc>,
    priority: RequestPriority,
}

impl RequestBuilder {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            customer_id: "CUST-001".to_string(),
            part_id: None,
            part_type: Some("STANDARD".to_string()),
            quantity: 5,
            due_date: base_time() + Duration::minutes(10_000),
            priority: RequestPriority::Normal,
        }
    }

    pub fn customer(mut self, customer_id: &str) -> Self {
        self.customer_id = customer_id.to_string();
        self
    }

    pub fn part_type(mut self, part_type: &str) -> Self {
        self.part_type = Some(part_type.to_string());
        self
    }

    pub fn no_part_type(mut self) -> Self {
        self.part_type = None;
        self
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn due_in_minutes(mut self, minutes: i64) -> Self {
        self.due_date = base_time() + Duration::minutes(minutes);
        self
    }

    pub fn due_at(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn priority(mut self, priority: RequestPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn build(self) -> ProductionRequest {
        ProductionRequest {
            request_id: self.request_id,
            customer_id: self.customer_id,
            part_id: self.part_id,
            part_type: self.part_type,
            quantity: self.quantity,
            due_date: self.due_date,
            priority: self.priority,
        }
    }
}

// ==========================================
// 便捷函数
// ==========================================

/// 创建测试用生产请求
pub fn create_test_request(request_id: &str, priority: RequestPriority) -> ProductionRequest {
    RequestBuilder::new(request_id).priority(priority).build()
}

/// 创建测试用机台
pub fn create_test_machine(machine_id: &str, status: MachineStatus) -> Machine {
    Machine {
        machine_id: machine_id.to_string(),
        machine_type: "CNC".to_string(),
        status,
    }
}

/// 创建测试用操作工
pub fn create_test_operator(operator_id: &str, active: bool) -> Operator {
    Operator {
        operator_id: operator_id.to_string(),
        name: format!("师傅-{}", operator_id),
        active,
    }
}

/// 创建测试用作业,时窗以 base_time 起算的分钟偏移给出
pub fn create_test_job(
    job_id: &str,
    machine_id: &str,
    operator_id: Option<&str>,
    start_offset_minutes: i64,
    end_offset_minutes: i64,
) -> ScheduledJob {
    let start = base_time() + Duration::minutes(start_offset_minutes);
    let end = base_time() + Duration::minutes(end_offset_minutes);
    ScheduledJob {
        job_id: job_id.to_string(),
        request_id: format!("REQ-{}", job_id),
        machine_id: machine_id.to_string(),
        operator_id: operator_id.map(|s| s.to_string()),
        scheduled_start: start,
        scheduled_end: end,
        setup_minutes: 0,
        run_minutes: end_offset_minutes - start_offset_minutes,
        status: JobStatus::Scheduled,
        priority: RequestPriority::Normal.rank(),
        due_date: base_time() + Duration::minutes(10_000),
        assign_reason: None,
        created_at: base_time(),
        updated_at: base_time(),
    }
}

/// 组装输入快照
pub fn snapshot_of(
    requests: Vec<ProductionRequest>,
    machines: Vec<Machine>,
    operators: Vec<Operator>,
) -> ScheduleSnapshot {
    ScheduleSnapshot::new(requests, machines, operators)
}
