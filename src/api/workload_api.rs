// ==========================================
// 课表冲突检测与工作量引擎 - 教师工作量 API
// ==========================================
// 职责: 工作量录入、课表推导、学期统计
// 约束: 所有派生字段由 WorkloadAggregator 计算, API 只负责校验与落库
// ==========================================

use std::sync::Arc;

use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::WorkloadStatus;
use crate::domain::workload::{WorkloadRecord, WorkloadSummary, WorkloadUpdate};
use crate::engine::WorkloadAggregator;
use crate::repository::schedule_repo::ScheduleEntryRepository;
use crate::repository::teacher_repo::TeacherRepository;
use crate::repository::workload_repo::WorkloadRepository;

// ==========================================
// WorkloadApi - 教师工作量 API
// ==========================================
pub struct WorkloadApi {
    workload_repo: Arc<WorkloadRepository>,
    teacher_repo: Arc<TeacherRepository>,
    schedule_repo: Arc<ScheduleEntryRepository>,
    aggregator: WorkloadAggregator,
}

impl WorkloadApi {
    pub fn new(
        workload_repo: Arc<WorkloadRepository>,
        teacher_repo: Arc<TeacherRepository>,
        schedule_repo: Arc<ScheduleEntryRepository>,
        aggregator: WorkloadAggregator,
    ) -> Self {
        Self {
            workload_repo,
            teacher_repo,
            schedule_repo,
            aggregator,
        }
    }

    /// 录入/修改工作量
    ///
    /// # 参数
    /// - update: 局部更新, 未给出的字段保持原值
    ///
    /// # 返回
    /// - Ok(WorkloadRecord): 重算并落库后的记录
    /// - Err(ApiError::InvalidInput): 主键为空、工时为负或非有限数、上限 <= 0
    #[instrument(skip(self, update))]
    pub fn update_workload(
        &self,
        teacher_id: &str,
        academic_year: &str,
        semester: &str,
        update: &WorkloadUpdate,
    ) -> ApiResult<WorkloadRecord> {
        validate_key(teacher_id, academic_year, semester)?;
        validate_update(update)?;

        let base = match self
            .workload_repo
            .find_by_key(teacher_id, academic_year, semester)?
        {
            Some(record) => record,
            None => self
                .aggregator
                .create_record(teacher_id, academic_year, semester, None),
        };

        let record = self.aggregator.recompute(&base, update);
        self.workload_repo.upsert(&record)?;

        info!(
            total_hours = record.total_hours_per_week(),
            status = %record.workload_status(),
            "工作量已保存"
        );
        Ok(record)
    }

    /// 由课表推导工作量并落库
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 教师不存在 (不写入任何数据)
    #[instrument(skip(self))]
    pub fn calculate_from_schedule(
        &self,
        teacher_id: &str,
        academic_year: &str,
        semester: &str,
    ) -> ApiResult<WorkloadRecord> {
        validate_key(teacher_id, academic_year, semester)?;

        if self.teacher_repo.find_by_id(teacher_id)?.is_none() {
            return Err(ApiError::NotFound(format!("教师(id={})不存在", teacher_id)));
        }

        let rows = self.schedule_repo.find_by_teacher(teacher_id)?;
        let existing = self
            .workload_repo
            .find_by_key(teacher_id, academic_year, semester)?;

        let record = self.aggregator.derive_from_schedule(
            teacher_id,
            academic_year,
            semester,
            &rows,
            existing.as_ref(),
        );
        self.workload_repo.upsert(&record)?;

        Ok(record)
    }

    /// 查询单条工作量
    pub fn get_workload(
        &self,
        teacher_id: &str,
        academic_year: &str,
        semester: &str,
    ) -> ApiResult<Option<WorkloadRecord>> {
        validate_key(teacher_id, academic_year, semester)?;
        Ok(self
            .workload_repo
            .find_by_key(teacher_id, academic_year, semester)?)
    }

    /// 学期整体统计
    pub fn get_summary(&self, academic_year: &str, semester: &str) -> ApiResult<WorkloadSummary> {
        validate_term(academic_year, semester)?;
        let records = self.workload_repo.find_by_term(academic_year, semester)?;
        Ok(self.aggregator.summarize(academic_year, semester, &records))
    }

    /// 学期内超负荷教师列表
    pub fn list_overloaded(
        &self,
        academic_year: &str,
        semester: &str,
    ) -> ApiResult<Vec<WorkloadRecord>> {
        validate_term(academic_year, semester)?;
        let records = self.workload_repo.find_by_term(academic_year, semester)?;
        Ok(records
            .into_iter()
            .filter(|r| r.workload_status() == WorkloadStatus::Overloaded)
            .collect())
    }

    /// 教师历年工作量 (按学年、学期倒序)
    pub fn list_teacher_history(&self, teacher_id: &str) -> ApiResult<Vec<WorkloadRecord>> {
        if teacher_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("教师ID不能为空".to_string()));
        }
        Ok(self.workload_repo.find_by_teacher(teacher_id)?)
    }
}

// ==========================================
// 输入校验
// ==========================================

fn validate_term(academic_year: &str, semester: &str) -> ApiResult<()> {
    if academic_year.trim().is_empty() {
        return Err(ApiError::InvalidInput("学年不能为空".to_string()));
    }
    if semester.trim().is_empty() {
        return Err(ApiError::InvalidInput("学期不能为空".to_string()));
    }
    Ok(())
}

fn validate_key(teacher_id: &str, academic_year: &str, semester: &str) -> ApiResult<()> {
    if teacher_id.trim().is_empty() {
        return Err(ApiError::InvalidInput("教师ID不能为空".to_string()));
    }
    validate_term(academic_year, semester)
}

fn validate_update(update: &WorkloadUpdate) -> ApiResult<()> {
    for (field, value) in update.numeric_fields() {
        if !value.is_finite() || value < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "{} 必须为非负数, 实际为 {}",
                field, value
            )));
        }
    }

    if let Some(max) = update.max_hours_per_week {
        if max <= 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "max_hours_per_week 必须大于 0, 实际为 {}",
                max
            )));
        }
    }

    Ok(())
}
