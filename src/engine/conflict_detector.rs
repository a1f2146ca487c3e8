// ==========================================
// 课表冲突检测与工作量引擎 - 课表冲突检测
// ==========================================
// 职责: 校验单个候选时间段与同日已有课表的冲突
// 输入: 候选时间段 + 解析后的班级科目关联 + 同日已有条目
// 输出: ConflictReport (按发现顺序, 空 = 可保存)
// ==========================================
// 红线: 无状态、无副作用, 不拼 SQL
// 红线: 除关联缺失外, 所有问题一次性收集, 不短路
// ==========================================

use crate::domain::conflict::{ConflictEntry, ConflictReport};
use crate::domain::schedule::{ClassSubjectAssignment, ScheduleEntry, TimeSlot};
use crate::domain::types::ConflictType;
use tracing::{debug, instrument, warn};

const TIME_FORMAT: &str = "%H:%M";

// ==========================================
// ConflictDetector - 课表冲突检测器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictDetector {
    // 无状态引擎，不需要注入依赖
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self {}
    }

    /// 检测候选时间段的冲突
    ///
    /// # 参数
    /// - `candidate`: 候选时间段
    /// - `assignment`: candidate.class_subject_id 的查询结果 (None = 不存在)
    /// - `existing_same_day`: 调用方已按 day_of_week 过滤的已有条目
    /// - `exclude_id`: 正在编辑的条目ID, 不与自身旧版本比较
    ///
    /// # 规则
    /// 1) 关联不存在: 只返回一条 class_subject_not_found
    /// 2) 半开区间重叠 + 同一教师 → teacher_conflict
    /// 3) 半开区间重叠 + 同一非空教室 → room_conflict (与 2 互不排斥)
    /// 4) start >= end → time_error (与重叠检查相互独立)
    #[instrument(skip(self, candidate, assignment, existing_same_day), fields(
        class_subject_id = %candidate.class_subject_id,
        day = %candidate.day_of_week,
        existing_count = existing_same_day.len()
    ))]
    pub fn detect(
        &self,
        candidate: &TimeSlot,
        assignment: Option<&ClassSubjectAssignment>,
        existing_same_day: &[ScheduleEntry],
        exclude_id: Option<&str>,
    ) -> ConflictReport {
        let mut report = ConflictReport::new();

        // 1. 解析候选的任课教师 (失败即返回)
        let assignment = match assignment {
            Some(a) => a,
            None => {
                warn!("班级科目关联不存在, 终止检测");
                report.push(ConflictEntry::new(
                    ConflictType::ClassSubjectNotFound,
                    format!("班级科目关联 {} 不存在", candidate.class_subject_id),
                ));
                return report;
            }
        };
        let candidate_teacher = Some(assignment.teacher_id.as_str())
            .map(str::trim)
            .filter(|id| !id.is_empty());
        let candidate_room = candidate.normalized_room();

        // 2. 逐条比较同日已有条目
        for entry in existing_same_day {
            if exclude_id == Some(entry.schedule_id.as_str()) {
                continue;
            }

            if !candidate.overlaps(&entry.slot) {
                continue;
            }

            let time_range = format!(
                "{}-{}",
                entry.slot.start_time.format(TIME_FORMAT),
                entry.slot.end_time.format(TIME_FORMAT)
            );

            match (candidate_teacher, entry.teacher_id()) {
                (Some(mine), Some(theirs)) if mine == theirs => {
                    report.push(ConflictEntry::against(
                        ConflictType::TeacherConflict,
                        format!(
                            "教师 {} 在{} {} 已有课程安排",
                            theirs, entry.slot.day_of_week, time_range
                        ),
                        &entry.schedule_id,
                    ));
                }
                (Some(_), None) => {
                    debug!(schedule_id = %entry.schedule_id, "条目无法解析教师, 跳过教师检查");
                }
                _ => {}
            }

            if let (Some(mine), Some(theirs)) = (candidate_room, entry.room()) {
                if mine == theirs {
                    report.push(ConflictEntry::against(
                        ConflictType::RoomConflict,
                        format!(
                            "教室 {} 在{} {} 已被占用",
                            theirs, entry.slot.day_of_week, time_range
                        ),
                        &entry.schedule_id,
                    ));
                }
            }
        }

        // 3. 时间段自身合法性 (不依赖重叠检查结果)
        if !candidate.is_well_formed() {
            report.push(ConflictEntry::new(
                ConflictType::TimeError,
                format!(
                    "开始时间 {} 必须早于结束时间 {}",
                    candidate.start_time.format(TIME_FORMAT),
                    candidate.end_time.format(TIME_FORMAT)
                ),
            ));
        }

        if report.is_clear() {
            debug!("未发现冲突");
        } else {
            warn!(
                conflicts = report.len(),
                teacher_conflicts = report.count(ConflictType::TeacherConflict),
                room_conflicts = report.count(ConflictType::RoomConflict),
                "检测到课表冲突"
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DayOfWeek;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn assignment(id: &str, teacher_id: &str) -> ClassSubjectAssignment {
        ClassSubjectAssignment {
            id: id.to_string(),
            teacher_id: teacher_id.to_string(),
            subject_id: "MATH".to_string(),
            class_id: "C1".to_string(),
        }
    }

    fn entry(
        schedule_id: &str,
        teacher_id: &str,
        start: NaiveTime,
        end: NaiveTime,
        room: Option<&str>,
    ) -> ScheduleEntry {
        let cs_id = format!("cs-{}", schedule_id);
        let mut slot = TimeSlot::new(DayOfWeek::Monday, start, end, &cs_id);
        slot.room = room.map(|r| r.to_string());
        ScheduleEntry {
            schedule_id: schedule_id.to_string(),
            slot,
            assignment: Some(assignment(&cs_id, teacher_id)),
        }
    }

    fn candidate(start: NaiveTime, end: NaiveTime, room: Option<&str>) -> TimeSlot {
        let mut slot = TimeSlot::new(DayOfWeek::Monday, start, end, "cs-new");
        slot.room = room.map(|r| r.to_string());
        slot
    }

    #[test]
    fn test_overlapping_same_teacher_reports_one_teacher_conflict() {
        let detector = ConflictDetector::new();
        let existing = vec![entry("s1", "T1", t(9, 0), t(10, 0), None)];
        let a = assignment("cs-new", "T1");

        let report = detector.detect(&candidate(t(9, 30), t(10, 30), None), Some(&a), &existing, None);

        assert_eq!(report.len(), 1);
        assert_eq!(report.count(ConflictType::TeacherConflict), 1);
        assert_eq!(
            report.entries()[0].conflicting_schedule_id.as_deref(),
            Some("s1")
        );
        assert!(report.entries()[0].message.contains("T1"));
        assert!(report.entries()[0].message.contains("周一"));
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        let detector = ConflictDetector::new();
        let existing = vec![entry("s1", "T1", t(9, 0), t(10, 0), Some("A101"))];
        let a = assignment("cs-new", "T1");

        let report = detector.detect(
            &candidate(t(10, 0), t(11, 0), Some("A101")),
            Some(&a),
            &existing,
            None,
        );

        assert!(report.is_clear());
    }

    #[test]
    fn test_disjoint_intervals_never_conflict() {
        let detector = ConflictDetector::new();
        let existing = vec![
            entry("s1", "T1", t(8, 0), t(9, 0), Some("A101")),
            entry("s2", "T1", t(13, 0), t(14, 0), Some("A101")),
        ];
        let a = assignment("cs-new", "T1");

        for (start, end) in [(t(9, 0), t(10, 0)), (t(10, 30), t(12, 0)), (t(14, 0), t(15, 0))] {
            let report = detector.detect(
                &candidate(start, end, Some("A101")),
                Some(&a),
                &existing,
                None,
            );
            assert!(report.is_clear(), "{}-{} 不应冲突", start, end);
        }
    }

    #[test]
    fn test_same_entry_can_yield_teacher_and_room_conflict() {
        let detector = ConflictDetector::new();
        let existing = vec![
            entry("s1", "T1", t(8, 0), t(9, 0), Some("A")),
            entry("s2", "T1", t(9, 0), t(10, 0), Some("B")),
        ];
        let a = assignment("cs-new", "T1");

        let report = detector.detect(
            &candidate(t(8, 30), t(9, 30), Some("A")),
            Some(&a),
            &existing,
            None,
        );

        // s1: 教师 + 教室; s2: 仅教师
        assert_eq!(report.count(ConflictType::TeacherConflict), 2);
        assert_eq!(report.count(ConflictType::RoomConflict), 1);
        let room = report
            .entries()
            .iter()
            .find(|e| e.conflict_type == ConflictType::RoomConflict)
            .unwrap();
        assert_eq!(room.conflicting_schedule_id.as_deref(), Some("s1"));
        // 按发现顺序: s1 教师 → s1 教室 → s2 教师
        assert_eq!(report.entries()[0].conflict_type, ConflictType::TeacherConflict);
        assert_eq!(report.entries()[1].conflict_type, ConflictType::RoomConflict);
    }

    #[test]
    fn test_room_conflict_between_different_teachers() {
        let detector = ConflictDetector::new();
        let existing = vec![entry("s1", "T2", t(8, 0), t(9, 0), Some("Lab"))];
        let a = assignment("cs-new", "T1");

        let report = detector.detect(
            &candidate(t(8, 0), t(9, 0), Some(" Lab ")),
            Some(&a),
            &existing,
            None,
        );

        assert_eq!(report.len(), 1);
        assert!(report.has(ConflictType::RoomConflict));
    }

    #[test]
    fn test_empty_room_never_conflicts() {
        let detector = ConflictDetector::new();
        let existing = vec![entry("s1", "T2", t(8, 0), t(9, 0), Some(""))];
        let a = assignment("cs-new", "T1");

        let report = detector.detect(
            &candidate(t(8, 0), t(9, 0), Some("")),
            Some(&a),
            &existing,
            None,
        );

        assert!(report.is_clear());
    }

    #[test]
    fn test_exclude_id_skips_prior_version() {
        let detector = ConflictDetector::new();
        let existing = vec![entry("s1", "T1", t(9, 0), t(10, 0), Some("A101"))];
        let a = assignment("cs-s1", "T1");

        let report = detector.detect(
            &candidate(t(9, 15), t(10, 15), Some("A101")),
            Some(&a),
            &existing,
            Some("s1"),
        );

        assert!(report.is_clear());
    }

    #[test]
    fn test_missing_assignment_short_circuits() {
        let detector = ConflictDetector::new();
        let existing = vec![entry("s1", "T1", t(9, 0), t(10, 0), Some("A101"))];

        // 即使时间段非法且教室冲突, 也只返回一条
        let report = detector.detect(
            &candidate(t(10, 0), t(9, 0), Some("A101")),
            None,
            &existing,
            None,
        );

        assert_eq!(report.len(), 1);
        assert_eq!(
            report.entries()[0].conflict_type,
            ConflictType::ClassSubjectNotFound
        );
    }

    #[test]
    fn test_time_error_collected_with_overlap_conflicts() {
        let detector = ConflictDetector::new();
        let existing = vec![entry("s1", "T1", t(9, 0), t(10, 0), Some("A101"))];
        let a = assignment("cs-new", "T1");

        // 9:45-9:30 非法; 仍与 [9:00,10:00) 满足 s1<e2 且 e1>s2
        let report = detector.detect(
            &candidate(t(9, 45), t(9, 30), Some("A101")),
            Some(&a),
            &existing,
            None,
        );

        assert!(report.has(ConflictType::TimeError));
        assert!(report.has(ConflictType::TeacherConflict));
        assert!(report.has(ConflictType::RoomConflict));
        assert_eq!(
            report.entries().last().unwrap().conflict_type,
            ConflictType::TimeError
        );
    }

    #[test]
    fn test_equal_start_end_is_time_error() {
        let detector = ConflictDetector::new();
        let a = assignment("cs-new", "T1");

        let report = detector.detect(&candidate(t(9, 0), t(9, 0), None), Some(&a), &[], None);

        assert_eq!(report.len(), 1);
        assert!(report.has(ConflictType::TimeError));
    }

    #[test]
    fn test_unresolvable_existing_entry_skips_teacher_check() {
        let detector = ConflictDetector::new();
        let mut orphan = entry("s1", "T1", t(9, 0), t(10, 0), Some("A101"));
        orphan.assignment = None;
        orphan.slot.teacher_id = None;
        let a = assignment("cs-new", "T1");

        let report = detector.detect(
            &candidate(t(9, 0), t(10, 0), Some("A101")),
            Some(&a),
            &[orphan],
            None,
        );

        // 教师无法解析 → 仅报告教室冲突
        assert_eq!(report.len(), 1);
        assert!(report.has(ConflictType::RoomConflict));
    }

    #[test]
    fn test_padded_teacher_id_still_conflicts() {
        let detector = ConflictDetector::new();
        let padded = assignment("cs-shared", "T1 ");
        let mut slot = TimeSlot::new(DayOfWeek::Monday, t(9, 0), t(10, 0), "cs-shared");
        slot.room = None;
        let existing = vec![ScheduleEntry {
            schedule_id: "s1".to_string(),
            slot,
            assignment: Some(padded.clone()),
        }];

        let report = detector.detect(
            &TimeSlot::new(DayOfWeek::Monday, t(9, 30), t(10, 30), "cs-shared"),
            Some(&padded),
            &existing,
            None,
        );

        assert_eq!(report.len(), 1);
        assert!(report.has(ConflictType::TeacherConflict));
        assert!(report.entries()[0].message.contains("教师 T1 "));
    }
}
