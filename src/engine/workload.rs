// ==========================================
// 课表冲突检测与工作量引擎 - 教师工作量引擎
// ==========================================
// 职责: 工时合计 + 负荷分类 + 课表推导 + 学期统计
// 输入: WorkloadRecord / WorkloadUpdate / 课表条目
// 输出: 重新计算后的 WorkloadRecord, WorkloadSummary
// ==========================================
// 红线: total_hours_per_week / workload_status 只能在此计算
// 红线: 不拼 SQL, 持久化由调用方处理
// ==========================================

mod core;
mod summary;

#[cfg(test)]
mod tests;

pub use self::core::{round2, WorkloadAggregator};
