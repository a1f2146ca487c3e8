// ==========================================
// 课表冲突检测与工作量引擎 - 教师工作量领域模型
// ==========================================
// 红线: total_hours_per_week / workload_status 永远是派生值,
//       只能由 WorkloadAggregator 计算, 不接受外部直接输入
// 主键: (teacher_id, academic_year, semester), upsert 语义
// ==========================================

use crate::domain::types::WorkloadStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// WorkloadRecord - 教师学期工作量
// ==========================================
// 只实现 Serialize: 外部输入统一走 WorkloadUpdate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadRecord {
    // ===== 主键 =====
    pub teacher_id: String,
    pub academic_year: String,
    pub semester: String,

    // ===== 上限 =====
    pub(crate) max_hours_per_week: f64,

    // ===== 六类工时 (小时/周) =====
    pub(crate) teaching_hours: f64,
    pub(crate) administrative_hours: f64,
    pub(crate) extracurricular_hours: f64,
    pub(crate) preparation_hours: f64,
    pub(crate) grading_hours: f64,
    pub(crate) other_duties_hours: f64,

    // ===== 派生字段 =====
    pub(crate) total_hours_per_week: f64,
    pub(crate) workload_status: WorkloadStatus,

    pub notes: Option<String>,
}

impl WorkloadRecord {
    /// 空白记录 (六类工时为 0), 派生字段需由引擎随后计算
    pub(crate) fn blank(
        teacher_id: &str,
        academic_year: &str,
        semester: &str,
        max_hours_per_week: f64,
    ) -> Self {
        Self {
            teacher_id: teacher_id.to_string(),
            academic_year: academic_year.to_string(),
            semester: semester.to_string(),
            max_hours_per_week,
            teaching_hours: 0.0,
            administrative_hours: 0.0,
            extracurricular_hours: 0.0,
            preparation_hours: 0.0,
            grading_hours: 0.0,
            other_duties_hours: 0.0,
            total_hours_per_week: 0.0,
            workload_status: WorkloadStatus::Normal,
            notes: None,
        }
    }

    pub fn max_hours_per_week(&self) -> f64 {
        self.max_hours_per_week
    }

    pub fn teaching_hours(&self) -> f64 {
        self.teaching_hours
    }

    pub fn administrative_hours(&self) -> f64 {
        self.administrative_hours
    }

    pub fn extracurricular_hours(&self) -> f64 {
        self.extracurricular_hours
    }

    pub fn preparation_hours(&self) -> f64 {
        self.preparation_hours
    }

    pub fn grading_hours(&self) -> f64 {
        self.grading_hours
    }

    pub fn other_duties_hours(&self) -> f64 {
        self.other_duties_hours
    }

    pub fn total_hours_per_week(&self) -> f64 {
        self.total_hours_per_week
    }

    pub fn workload_status(&self) -> WorkloadStatus {
        self.workload_status
    }

    /// 六类工时之和 (未舍入)
    pub fn category_sum(&self) -> f64 {
        self.teaching_hours
            + self.administrative_hours
            + self.extracurricular_hours
            + self.preparation_hours
            + self.grading_hours
            + self.other_duties_hours
    }

    /// 是否为同一主键
    pub fn same_key(&self, teacher_id: &str, academic_year: &str, semester: &str) -> bool {
        self.teacher_id == teacher_id
            && self.academic_year == academic_year
            && self.semester == semester
    }
}

// ==========================================
// WorkloadUpdate - 局部更新
// ==========================================
// 只包含可直接录入的字段, None 表示保持原值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadUpdate {
    pub max_hours_per_week: Option<f64>,
    pub teaching_hours: Option<f64>,
    pub administrative_hours: Option<f64>,
    pub extracurricular_hours: Option<f64>,
    pub preparation_hours: Option<f64>,
    pub grading_hours: Option<f64>,
    pub other_duties_hours: Option<f64>,
    pub notes: Option<String>,
}

impl WorkloadUpdate {
    /// 所有带值的数值字段 (字段名, 值), 用于输入校验
    pub fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        [
            ("max_hours_per_week", self.max_hours_per_week),
            ("teaching_hours", self.teaching_hours),
            ("administrative_hours", self.administrative_hours),
            ("extracurricular_hours", self.extracurricular_hours),
            ("preparation_hours", self.preparation_hours),
            ("grading_hours", self.grading_hours),
            ("other_duties_hours", self.other_duties_hours),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.numeric_fields().is_empty() && self.notes.is_none()
    }
}

// ==========================================
// WorkloadSummary - 学期整体统计 (不落库)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSummary {
    pub academic_year: String,
    pub semester: String,

    pub total_teachers: usize,

    pub overloaded_count: usize,
    pub overloaded_percentage: f64,

    pub underloaded_count: usize,
    pub underloaded_percentage: f64,

    /// = total - overloaded - underloaded
    pub normal_count: usize,
    pub normal_percentage: f64,

    pub average_hours_per_week: f64,
    pub average_max_hours: f64,
    /// average_hours / average_max_hours * 100
    pub average_utilization: f64,
}
