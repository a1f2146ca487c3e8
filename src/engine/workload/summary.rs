// ==========================================
// 课表冲突检测与工作量引擎 - 学期工作量统计
// ==========================================
// normal_count = total - overloaded - underloaded (不单独计数)
// 零条记录时所有数值为 0, 不出现 NaN
// ==========================================

use super::core::{round2, WorkloadAggregator};
use crate::domain::types::WorkloadStatus;
use crate::domain::workload::{WorkloadRecord, WorkloadSummary};
use tracing::{debug, instrument};

/// 百分比 (保留 2 位小数), 分母为 0 时返回 0
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

impl WorkloadAggregator {
    /// 学期整体统计
    ///
    /// # 参数
    /// - `records`: 同一 (academic_year, semester) 下所有教师的工作量记录
    #[instrument(skip(self, records), fields(records_count = records.len()))]
    pub fn summarize(
        &self,
        academic_year: &str,
        semester: &str,
        records: &[WorkloadRecord],
    ) -> WorkloadSummary {
        let total_teachers = records.len();

        let overloaded_count = records
            .iter()
            .filter(|r| r.workload_status() == WorkloadStatus::Overloaded)
            .count();
        let underloaded_count = records
            .iter()
            .filter(|r| r.workload_status() == WorkloadStatus::Underloaded)
            .count();
        let normal_count = total_teachers - overloaded_count - underloaded_count;

        let (average_hours, average_max) = if total_teachers == 0 {
            (0.0, 0.0)
        } else {
            let n = total_teachers as f64;
            (
                records.iter().map(|r| r.total_hours_per_week()).sum::<f64>() / n,
                records.iter().map(|r| r.max_hours_per_week()).sum::<f64>() / n,
            )
        };

        let average_utilization = if average_max > 0.0 {
            round2(average_hours / average_max * 100.0)
        } else {
            0.0
        };

        let summary = WorkloadSummary {
            academic_year: academic_year.to_string(),
            semester: semester.to_string(),
            total_teachers,
            overloaded_count,
            overloaded_percentage: percentage(overloaded_count, total_teachers),
            underloaded_count,
            underloaded_percentage: percentage(underloaded_count, total_teachers),
            normal_count,
            normal_percentage: percentage(normal_count, total_teachers),
            average_hours_per_week: round2(average_hours),
            average_max_hours: round2(average_max),
            average_utilization,
        };

        debug!(
            total_teachers,
            overloaded_count,
            underloaded_count,
            normal_count,
            "学期工作量统计完成"
        );

        summary
    }
}
