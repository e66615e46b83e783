// ==========================================
// 车间生产排产系统 - 请求排序引擎
// ==========================================
// 职责: 排产/优化两种口径的请求排序
// 红线: 排序必须确定性,稳定排序保证同键保持输入顺序
// ==========================================

use crate::domain::request::ProductionRequest;
use std::cmp::Ordering;

// ==========================================
// RequestSorter - 请求排序引擎
// ==========================================
pub struct RequestSorter {
    // 无状态引擎,不需要注入依赖
}

impl RequestSorter {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 RequestSorter 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 排产口径排序
    ///
    /// 排序键:
    /// 1) 优先级数值序升序 (rush=0 → low=3)
    /// 2) due_date 升序 (早交期优先)
    ///
    /// # 参数
    /// - `requests`: 待排序的请求列表
    ///
    /// # 返回
    /// 排序后的请求列表（按优先级从高到低）
    pub fn sort_for_plan(&self, mut requests: Vec<ProductionRequest>) -> Vec<ProductionRequest> {
        requests.sort_by(|a, b| self.compare_for_plan(a, b));
        requests
    }

    /// 优化口径排序
    ///
    /// 排序键:
    /// 1) 零件类型升序 (同类型聚类,压缩换型总量;无类型聚为空串)
    /// 2) 优先级数值序升序
    ///
    /// # 参数
    /// - `requests`: 待排序的请求列表
    pub fn sort_for_optimize(
        &self,
        mut requests: Vec<ProductionRequest>,
    ) -> Vec<ProductionRequest> {
        requests.sort_by(|a, b| self.compare_for_optimize(a, b));
        requests
    }

    // ==========================================
    // 比较方法
    // ==========================================

    /// 比较两个请求的排产优先序
    ///
    /// # 返回
    /// Ordering::Less 表示 a 优先于 b
    fn compare_for_plan(&self, a: &ProductionRequest, b: &ProductionRequest) -> Ordering {
        // 1. 比较优先级数值序 (升序,越小越优先)
        match a.priority_rank().cmp(&b.priority_rank()) {
            Ordering::Equal => {}
            other => return other,
        }

        // 2. 比较 due_date (升序,越早越优先)
        a.due_date.cmp(&b.due_date)
    }

    /// 比较两个请求的优化聚类序
    fn compare_for_optimize(&self, a: &ProductionRequest, b: &ProductionRequest) -> Ordering {
        // 1. 比较零件类型 (升序,同类型相邻)
        match a.part_type_key().cmp(b.part_type_key()) {
            Ordering::Equal => {}
            other => return other,
        }

        // 2. 比较优先级数值序 (升序)
        a.priority_rank().cmp(&b.priority_rank())
    }
}

impl Default for RequestSorter {
    fn default() -> Self {
        Self::new()
    }
}
