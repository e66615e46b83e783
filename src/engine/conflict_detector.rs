// ==========================================
// 车间生产排产系统 - 冲突检测引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
// 红线: 输出顺序确定性 —— 下标对 i<j 扫描,
//       同一对先机台后人员,重复运行字节级一致
// ==========================================
// 职责: 作业清单 → 资源双占冲突清单
// 复杂度: O(n²) 对扫描;排产视野以天计、作业量数百量级,
//         这是已确认的扩展上限,不做提前优化
// ==========================================

use crate::domain::conflict::ScheduleConflict;
use crate::domain::job::ScheduledJob;
use tracing::{debug, instrument};

// ==========================================
// ConflictDetector - 冲突检测引擎
// ==========================================
pub struct ConflictDetector {
    // 无状态引擎,不需要注入依赖
}

impl ConflictDetector {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 ConflictDetector 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 全量对扫描
    ///
    /// 对每个无序作业对 (a, b):
    /// - 同机台且半开区间重叠 → MACHINE/HIGH 冲突
    /// - 双方有操作工且同人且区间重叠 → OPERATOR/MEDIUM 冲突
    /// 一对作业可产出 0/1/2 条冲突（按共享资源计）。
    ///
    /// 检测不看作业状态: 状态转换不改时窗,已取消作业仍占用
    /// 其记录时窗,整表口径保持一致。
    ///
    /// # 参数
    /// - `jobs`: 作业清单（遍历顺序即输出顺序）
    ///
    /// # 返回
    /// 冲突清单
    #[instrument(skip_all, fields(jobs_count = jobs.len()))]
    pub fn detect(&self, jobs: &[ScheduledJob]) -> Vec<ScheduleConflict> {
        let mut conflicts = Vec::new();

        for i in 0..jobs.len() {
            for j in (i + 1)..jobs.len() {
                let a = &jobs[i];
                let b = &jobs[j];

                if !a.overlaps(b) {
                    continue;
                }

                // 机台双占
                if a.machine_id == b.machine_id {
                    conflicts.push(ScheduleConflict::machine(
                        &a.job_id,
                        &b.job_id,
                        &a.machine_id,
                    ));
                }

                // 人员双占（双方都有操作工才可能共享）
                if let (Some(op_a), Some(op_b)) = (&a.operator_id, &b.operator_id) {
                    if op_a == op_b {
                        conflicts.push(ScheduleConflict::operator(&a.job_id, &b.job_id, op_a));
                    }
                }
            }
        }

        debug!(conflicts_count = conflicts.len(), "冲突检测完成");
        conflicts
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
