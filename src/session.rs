// ==========================================
// 车间生产排产系统 - 排产会话层
// ==========================================
// 职责: 每个车间一个会话,持有最近一轮排产结果,
//       把四个排产操作串到快照来源与 API 之上
// 红线: 同一会话上的操作必须串行化(内部互斥锁),
//       不同会话相互独立
// 红线: 会话层是唯一允许取墙钟的层,引擎一律用注入时间
// ==========================================

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::{
    ApiError, ApiResult, OptimizeOutcome, PlanOutcome, RescheduleOutcome, ScheduleApi,
    TransitionOutcome,
};
use crate::domain::conflict::{PlanWarning, ScheduleConflict};
use crate::domain::job::ScheduledJob;
use crate::domain::request::ProductionRequest;
use crate::domain::resource::{Machine, Operator};
use crate::domain::snapshot::ScheduleSnapshot;
use crate::domain::types::TransitionAction;

// ==========================================
// SnapshotSource Trait
// ==========================================
// 用途: 会话加载排产输入的唯一入口
// 实现者: InMemorySnapshotSource(生产环境可换数据库/MES 来源)
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// 加载全部生产请求
    async fn load_requests(&self) -> anyhow::Result<Vec<ProductionRequest>>;

    /// 加载全部机台
    async fn load_machines(&self) -> anyhow::Result<Vec<Machine>>;

    /// 加载全部操作工
    async fn load_operators(&self) -> anyhow::Result<Vec<Operator>>;
}

// ==========================================
// InMemorySnapshotSource - 内存快照来源
// ==========================================

/// 内存快照来源
///
/// 三张清单独立持有读写锁,替换整表,不做增量修改。
pub struct InMemorySnapshotSource {
    requests: RwLock<Vec<ProductionRequest>>,
    machines: RwLock<Vec<Machine>>,
    operators: RwLock<Vec<Operator>>,
}

impl InMemorySnapshotSource {
    /// 构造函数
    pub fn new(
        requests: Vec<ProductionRequest>,
        machines: Vec<Machine>,
        operators: Vec<Operator>,
    ) -> Self {
        Self {
            requests: RwLock::new(requests),
            machines: RwLock::new(machines),
            operators: RwLock::new(operators),
        }
    }

    /// 空来源
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// 整表替换生产请求
    pub async fn replace_requests(&self, requests: Vec<ProductionRequest>) {
        *self.requests.write().await = requests;
    }

    /// 整表替换机台
    pub async fn replace_machines(&self, machines: Vec<Machine>) {
        *self.machines.write().await = machines;
    }

    /// 整表替换操作工
    pub async fn replace_operators(&self, operators: Vec<Operator>) {
        *self.operators.write().await = operators;
    }
}

#[async_trait]
impl SnapshotSource for InMemorySnapshotSource {
    async fn load_requests(&self) -> anyhow::Result<Vec<ProductionRequest>> {
        Ok(self.requests.read().await.clone())
    }

    async fn load_machines(&self) -> anyhow::Result<Vec<Machine>> {
        Ok(self.machines.read().await.clone())
    }

    async fn load_operators(&self) -> anyhow::Result<Vec<Operator>> {
        Ok(self.operators.read().await.clone())
    }
}

// ==========================================
// ScheduleSession - 排产会话
// ==========================================

/// 会话状态: 最近一次操作后的作业/冲突/告警
#[derive(Debug, Clone, Default)]
struct SessionState {
    jobs: Vec<ScheduledJob>,
    conflicts: Vec<ScheduleConflict>,
    warnings: Vec<PlanWarning>,
}

/// 排产会话
///
/// 职责:
/// 1. 每个车间一个会话,持有该车间最近一轮排产结果
/// 2. plan/optimize 从来源加载快照后整体重算并取代旧结果
/// 3. reschedule/transition 基于持有的作业清单做单点修改
/// 4. 同会话操作经由互斥锁串行化;不同会话互不可见
pub struct ScheduleSession {
    session_id: Uuid,    // 会话追踪标识(仅用于日志)
    shop_floor: String,  // 车间标识
    api: ScheduleApi,
    source: Arc<dyn SnapshotSource>,
    state: Mutex<SessionState>,
}

impl ScheduleSession {
    /// 创建新的排产会话
    ///
    /// # 参数
    /// - `shop_floor`: 车间标识
    /// - `api`: 排产 API 实例
    /// - `source`: 快照来源
    pub fn new(
        shop_floor: impl Into<String>,
        api: ScheduleApi,
        source: Arc<dyn SnapshotSource>,
    ) -> Self {
        let session_id = Uuid::new_v4();
        let shop_floor = shop_floor.into();
        info!(session_id = %session_id, shop_floor = %shop_floor, "会话已创建");
        Self {
            session_id,
            shop_floor,
            api,
            source,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// 会话追踪标识
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// 车间标识
    pub fn shop_floor(&self) -> &str {
        &self.shop_floor
    }

    // ==========================================
    // 操作入口
    // ==========================================

    /// 整体排产: 加载快照 → plan → 取代会话结果
    #[instrument(skip_all, fields(session_id = %self.session_id, shop_floor = %self.shop_floor))]
    pub async fn plan(&self) -> ApiResult<PlanOutcome> {
        let mut state = self.state.lock().await;
        let snapshot = self.load_snapshot().await?;
        let outcome = self.api.plan(&snapshot, Utc::now())?;
        state.jobs = outcome.jobs.clone();
        state.conflicts = outcome.conflicts.clone();
        state.warnings = outcome.warnings.clone();
        Ok(outcome)
    }

    /// 整体优化: 加载快照 → optimize → 取代会话结果
    #[instrument(skip_all, fields(session_id = %self.session_id, shop_floor = %self.shop_floor))]
    pub async fn optimize(&self) -> ApiResult<OptimizeOutcome> {
        let mut state = self.state.lock().await;
        let snapshot = self.load_snapshot().await?;
        let outcome = self.api.optimize(&snapshot, Utc::now())?;
        state.jobs = outcome.jobs.clone();
        state.conflicts = outcome.conflicts.clone();
        state.warnings = outcome.warnings.clone();
        Ok(outcome)
    }

    /// 改排单个作业,全量重检冲突后更新会话结果
    #[instrument(skip_all, fields(session_id = %self.session_id, job_id = %job_id))]
    pub async fn reschedule(
        &self,
        job_id: &str,
        new_start: DateTime<Utc>,
        new_machine_id: Option<&str>,
    ) -> ApiResult<RescheduleOutcome> {
        let mut state = self.state.lock().await;
        let machines = self
            .source
            .load_machines()
            .await
            .map_err(|e| ApiError::SnapshotUnavailable(e.to_string()))?;
        let outcome = self.api.reschedule(
            &state.jobs,
            job_id,
            new_start,
            new_machine_id,
            &machines,
            Utc::now(),
        )?;
        state.jobs = outcome.jobs.clone();
        state.conflicts = outcome.conflicts.clone();
        Ok(outcome)
    }

    /// 作业状态机转换,不重算冲突
    #[instrument(skip_all, fields(session_id = %self.session_id, job_id = %job_id))]
    pub async fn transition(
        &self,
        job_id: &str,
        action: TransitionAction,
    ) -> ApiResult<TransitionOutcome> {
        let mut state = self.state.lock().await;
        let outcome = self.api.transition(&state.jobs, job_id, action, Utc::now())?;
        state.jobs = outcome.jobs.clone();
        Ok(outcome)
    }

    // ==========================================
    // 结果查询
    // ==========================================

    /// 当前全量作业清单
    pub async fn jobs(&self) -> Vec<ScheduledJob> {
        self.state.lock().await.jobs.clone()
    }

    /// 当前全量冲突清单
    pub async fn conflicts(&self) -> Vec<ScheduleConflict> {
        self.state.lock().await.conflicts.clone()
    }

    /// 最近一轮排产/优化的告警
    pub async fn warnings(&self) -> Vec<PlanWarning> {
        self.state.lock().await.warnings.clone()
    }

    // ==========================================
    // 内部
    // ==========================================

    /// 并发加载三张清单,拼成输入快照
    async fn load_snapshot(&self) -> ApiResult<ScheduleSnapshot> {
        let (requests, machines, operators) = futures::try_join!(
            self.source.load_requests(),
            self.source.load_machines(),
            self.source.load_operators(),
        )
        .map_err(|e| ApiError::SnapshotUnavailable(e.to_string()))?;
        Ok(ScheduleSnapshot::new(requests, machines, operators))
    }
}
