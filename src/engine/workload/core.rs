// ==========================================
// 课表冲突检测与工作量引擎 - 教师工作量引擎
// ==========================================
// 合计: total = 授课 + 行政 + 课外 + 备课 + 批改 + 其他 (保留 2 位小数)
// 分类: overloaded  (total > max)
//       underloaded (total < max * underload_threshold)
//       normal      (其余)
// 顺序: 先判超负荷, 再判欠负荷
// ==========================================

use crate::config::WorkloadConfig;
use crate::domain::schedule::ScheduleEntry;
use crate::domain::types::WorkloadStatus;
use crate::domain::workload::{WorkloadRecord, WorkloadUpdate};
use crate::engine::error::EngineResult;
use tracing::{debug, info, instrument};

/// 保留 2 位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ==========================================
// WorkloadAggregator - 工作量引擎
// ==========================================
// 配置在构造时校验, 计算时不再检查
#[derive(Debug, Clone)]
pub struct WorkloadAggregator {
    pub(super) config: WorkloadConfig,
}

impl WorkloadAggregator {
    /// 创建工作量引擎
    ///
    /// # 返回
    /// - Err(EngineError::InvalidConfiguration): 上限 <= 0 或阈值不在 [0, 1)
    pub fn new(config: WorkloadConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    // ==========================================
    // 分类
    // ==========================================

    /// 负荷分类
    pub fn classify(&self, total_hours: f64, max_hours: f64) -> WorkloadStatus {
        if total_hours > max_hours {
            WorkloadStatus::Overloaded
        } else if total_hours < max_hours * self.config.underload_threshold {
            WorkloadStatus::Underloaded
        } else {
            WorkloadStatus::Normal
        }
    }

    /// 重新计算派生字段 (原地)
    fn apply_derived(&self, record: &mut WorkloadRecord) {
        record.total_hours_per_week = round2(record.category_sum());
        record.workload_status =
            self.classify(record.total_hours_per_week, record.max_hours_per_week);
    }

    // ==========================================
    // 记录创建 / 更新
    // ==========================================

    /// 创建空白记录 (六类工时为 0)
    ///
    /// # 参数
    /// - `max_hours_per_week`: None 时使用配置的默认上限
    pub fn create_record(
        &self,
        teacher_id: &str,
        academic_year: &str,
        semester: &str,
        max_hours_per_week: Option<f64>,
    ) -> WorkloadRecord {
        let max = max_hours_per_week.unwrap_or(self.config.default_max_hours_per_week);
        let mut record = WorkloadRecord::blank(teacher_id, academic_year, semester, max);
        self.apply_derived(&mut record);
        record
    }

    /// 应用局部更新并重算合计与状态
    ///
    /// 只覆盖 updates 中存在的字段, 其余保持原值;
    /// 相同 updates 重复调用结果不变
    #[instrument(skip(self, record, updates), fields(
        teacher_id = %record.teacher_id,
        academic_year = %record.academic_year,
        semester = %record.semester
    ))]
    pub fn recompute(&self, record: &WorkloadRecord, updates: &WorkloadUpdate) -> WorkloadRecord {
        let mut next = record.clone();

        if let Some(v) = updates.max_hours_per_week {
            next.max_hours_per_week = v;
        }
        if let Some(v) = updates.teaching_hours {
            next.teaching_hours = v;
        }
        if let Some(v) = updates.administrative_hours {
            next.administrative_hours = v;
        }
        if let Some(v) = updates.extracurricular_hours {
            next.extracurricular_hours = v;
        }
        if let Some(v) = updates.preparation_hours {
            next.preparation_hours = v;
        }
        if let Some(v) = updates.grading_hours {
            next.grading_hours = v;
        }
        if let Some(v) = updates.other_duties_hours {
            next.other_duties_hours = v;
        }
        if let Some(notes) = &updates.notes {
            next.notes = Some(notes.clone());
        }

        self.apply_derived(&mut next);

        debug!(
            total_hours = next.total_hours_per_week,
            max_hours = next.max_hours_per_week,
            status = %next.workload_status,
            "工作量已重算"
        );

        next
    }

    // ==========================================
    // 课表推导
    // ==========================================

    /// 教师的周授课工时 (小时, 保留 2 位小数)
    ///
    /// 只统计属于该教师的条目; 时长 <= 0 的非法条目不计入
    pub fn teaching_hours_from_schedule(&self, teacher_id: &str, rows: &[ScheduleEntry]) -> f64 {
        let total_minutes: i64 = rows
            .iter()
            .filter(|row| row.teacher_id() == Some(teacher_id))
            .map(|row| {
                let minutes = row.slot.duration_minutes();
                if minutes <= 0 {
                    debug!(schedule_id = %row.schedule_id, minutes, "非法时长, 不计入授课工时");
                }
                minutes.max(0)
            })
            .sum();

        round2(total_minutes as f64 / 60.0)
    }

    /// 由课表推导工作量
    ///
    /// # 规则
    /// 1) teaching = 该教师所有课表条目时长之和
    /// 2) preparation = teaching * preparation_ratio
    /// 3) grading = teaching * grading_ratio
    /// 4) 行政/课外/其他保持原值 (无原记录时为 0)
    /// 5) 无原记录时以默认上限新建, 有原记录时原地更新
    #[instrument(skip(self, rows, existing), fields(rows_count = rows.len(), has_existing = existing.is_some()))]
    pub fn derive_from_schedule(
        &self,
        teacher_id: &str,
        academic_year: &str,
        semester: &str,
        rows: &[ScheduleEntry],
        existing: Option<&WorkloadRecord>,
    ) -> WorkloadRecord {
        let base = match existing {
            Some(record) if record.same_key(teacher_id, academic_year, semester) => record.clone(),
            _ => self.create_record(teacher_id, academic_year, semester, None),
        };

        let teaching_hours = self.teaching_hours_from_schedule(teacher_id, rows);
        let updates = WorkloadUpdate {
            teaching_hours: Some(teaching_hours),
            preparation_hours: Some(round2(teaching_hours * self.config.preparation_ratio)),
            grading_hours: Some(round2(teaching_hours * self.config.grading_ratio)),
            ..WorkloadUpdate::default()
        };

        let record = self.recompute(&base, &updates);

        info!(
            teacher_id = teacher_id,
            teaching_hours = record.teaching_hours,
            total_hours = record.total_hours_per_week,
            status = %record.workload_status,
            "课表工作量推导完成"
        );

        record
    }
}
