// ==========================================
// 课表冲突检测与工作量引擎 - 课表 API
// ==========================================
// 职责: 时间段冲突检查、课表条目增删改查
// 流程: 解析关联 → 读取同日条目 → ConflictDetector → 落库
// ==========================================
// 注: 检查与落库之间不加锁, 并发写入的串行化由调用方负责
// ==========================================

use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::conflict::ConflictReport;
use crate::domain::schedule::{ClassSubjectAssignment, ScheduleEntry, TimeSlot};
use crate::engine::ConflictDetector;
use crate::repository::class_subject_repo::ClassSubjectRepository;
use crate::repository::schedule_repo::ScheduleEntryRepository;

// ==========================================
// ScheduleApi - 课表 API
// ==========================================
pub struct ScheduleApi {
    schedule_repo: Arc<ScheduleEntryRepository>,
    class_subject_repo: Arc<ClassSubjectRepository>,
    detector: ConflictDetector,
}

impl ScheduleApi {
    pub fn new(
        schedule_repo: Arc<ScheduleEntryRepository>,
        class_subject_repo: Arc<ClassSubjectRepository>,
    ) -> Self {
        Self {
            schedule_repo,
            class_subject_repo,
            detector: ConflictDetector::new(),
        }
    }

    /// 解析关联并执行冲突检测
    fn run_check(
        &self,
        candidate: &TimeSlot,
        exclude_id: Option<&str>,
    ) -> ApiResult<(Option<ClassSubjectAssignment>, ConflictReport)> {
        if candidate.class_subject_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("班级科目关联ID不能为空".to_string()));
        }

        let assignment = self
            .class_subject_repo
            .find_by_id(&candidate.class_subject_id)?;
        let existing = self.schedule_repo.find_by_day(candidate.day_of_week)?;

        let report =
            self.detector
                .detect(candidate, assignment.as_ref(), &existing, exclude_id);

        Ok((assignment, report))
    }

    /// 检查候选时间段 (只读)
    ///
    /// # 参数
    /// - candidate: 候选时间段
    /// - exclude_id: 编辑已有条目时传入其ID
    ///
    /// # 返回
    /// - Ok(ConflictReport): 空报告表示可保存
    pub fn check_slot(
        &self,
        candidate: &TimeSlot,
        exclude_id: Option<&str>,
    ) -> ApiResult<ConflictReport> {
        let (_, report) = self.run_check(candidate, exclude_id)?;
        Ok(report)
    }

    /// 新建课表条目
    ///
    /// # 返回
    /// - Ok(ScheduleEntry): 已落库条目 (schedule_id 新生成)
    /// - Err(ApiError::ScheduleConflict): 冲突报告非空, 不落库
    #[instrument(skip(self, candidate), fields(
        class_subject_id = %candidate.class_subject_id,
        day = %candidate.day_of_week
    ))]
    pub fn create_slot(&self, candidate: TimeSlot) -> ApiResult<ScheduleEntry> {
        let (assignment, report) = self.run_check(&candidate, None)?;
        if !report.is_clear() {
            warn!(conflicts = report.len(), "课表冲突, 拒绝保存");
            return Err(ApiError::ScheduleConflict { report });
        }

        let entry = build_entry(Uuid::new_v4().to_string(), candidate, assignment);
        self.schedule_repo.insert(&entry)?;

        info!(schedule_id = %entry.schedule_id, "课表条目已创建");
        Ok(entry)
    }

    /// 修改课表条目
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): schedule_id 不存在
    /// - Err(ApiError::ScheduleConflict): 与其他条目冲突 (不与自身旧版本比较)
    #[instrument(skip(self, candidate), fields(day = %candidate.day_of_week))]
    pub fn update_slot(&self, schedule_id: &str, candidate: TimeSlot) -> ApiResult<ScheduleEntry> {
        if self.schedule_repo.find_by_id(schedule_id)?.is_none() {
            return Err(ApiError::NotFound(format!("课表条目(id={})不存在", schedule_id)));
        }

        let (assignment, report) = self.run_check(&candidate, Some(schedule_id))?;
        if !report.is_clear() {
            warn!(conflicts = report.len(), "课表冲突, 拒绝修改");
            return Err(ApiError::ScheduleConflict { report });
        }

        let entry = build_entry(schedule_id.to_string(), candidate, assignment);
        self.schedule_repo.update(&entry)?;

        info!("课表条目已修改");
        Ok(entry)
    }

    /// 删除课表条目
    pub fn delete_slot(&self, schedule_id: &str) -> ApiResult<()> {
        self.schedule_repo.delete(schedule_id)?;
        info!(schedule_id = schedule_id, "课表条目已删除");
        Ok(())
    }

    /// 查询教师的全部课表 (按星期、开始时间排序)
    pub fn list_teacher_schedule(&self, teacher_id: &str) -> ApiResult<Vec<ScheduleEntry>> {
        if teacher_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("教师ID不能为空".to_string()));
        }

        Ok(self.schedule_repo.find_by_teacher(teacher_id)?)
    }
}

/// 组装待落库条目, teacher_id 缺省时由关联补全
fn build_entry(
    schedule_id: String,
    mut slot: TimeSlot,
    assignment: Option<ClassSubjectAssignment>,
) -> ScheduleEntry {
    if let Some(a) = &assignment {
        if slot.teacher_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            slot.teacher_id = Some(a.teacher_id.clone());
        }
    }

    ScheduleEntry {
        schedule_id,
        slot,
        assignment,
    }
}
