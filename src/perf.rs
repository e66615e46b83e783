use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

static SLOW_OP_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

/// 读取慢操作阈值（毫秒）
///
/// 开关：
/// - `WORKSHOP_APS_SLOW_OP_MS=200` 配置慢操作阈值
/// - 未配置时 Debug 默认 200ms，Release 默认 500ms
fn slow_op_threshold_ms() -> u64 {
    let cached = SLOW_OP_THRESHOLD_MS.load(Ordering::Relaxed);
    if cached > 0 {
        return cached;
    }
    let ms = std::env::var("WORKSHOP_APS_SLOW_OP_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 200 } else { 500 });
    SLOW_OP_THRESHOLD_MS.store(ms, Ordering::Relaxed);
    ms
}

/// 性能统计 Guard：作用域结束时记录 elapsed_ms
///
/// 排产运行是 O(n²) 批量计算，单次运行应在毫秒级结束；
/// 超过阈值的运行升级为 warn，便于发现作业量失控。
///
/// 使用方式：
/// ```ignore
/// let _perf = workshop_aps::perf::PerfGuard::new("plan");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let threshold = slow_op_threshold_ms();

        if threshold > 0 && elapsed_ms >= threshold {
            tracing::warn!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                "slow op"
            );
        } else {
            tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                "done"
            );
        }
    }
}
