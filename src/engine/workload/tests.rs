use super::*;
use crate::config::WorkloadConfig;
use crate::domain::schedule::{ClassSubjectAssignment, ScheduleEntry, TimeSlot};
use crate::domain::types::{DayOfWeek, WorkloadStatus};
use crate::domain::workload::{WorkloadRecord, WorkloadUpdate};
use chrono::NaiveTime;

// ==========================================
// 测试辅助函数
// ==========================================

fn aggregator() -> WorkloadAggregator {
    WorkloadAggregator::new(WorkloadConfig::default()).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// 创建测试用的课表条目
fn schedule_row(
    schedule_id: &str,
    teacher_id: &str,
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
) -> ScheduleEntry {
    let cs_id = format!("cs-{}", schedule_id);
    ScheduleEntry {
        schedule_id: schedule_id.to_string(),
        slot: TimeSlot::new(day, start, end, &cs_id),
        assignment: Some(ClassSubjectAssignment {
            id: cs_id,
            teacher_id: teacher_id.to_string(),
            subject_id: "PHYS".to_string(),
            class_id: "C2".to_string(),
        }),
    }
}

/// 创建指定总工时的记录 (全部记入授课工时)
fn record_with_total(agg: &WorkloadAggregator, teacher_id: &str, total: f64) -> WorkloadRecord {
    let record = agg.create_record(teacher_id, "2025-2026", "1", None);
    agg.recompute(
        &record,
        &WorkloadUpdate {
            teaching_hours: Some(total),
            ..WorkloadUpdate::default()
        },
    )
}

// ==========================================
// 构造 / 配置
// ==========================================

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config = WorkloadConfig {
        underload_threshold: 1.2,
        ..WorkloadConfig::default()
    };
    assert!(WorkloadAggregator::new(config).is_err());

    let config = WorkloadConfig {
        default_max_hours_per_week: -1.0,
        ..WorkloadConfig::default()
    };
    assert!(WorkloadAggregator::new(config).is_err());
}

#[test]
fn test_round2() {
    assert_eq!(round2(0.899999999), 0.9);
    assert_eq!(round2(12.344), 12.34);
    assert_eq!(round2(12.346), 12.35);
}

#[test]
fn test_create_record_uses_default_ceiling() {
    let agg = aggregator();
    let record = agg.create_record("T1", "2025-2026", "1", None);

    assert_eq!(record.max_hours_per_week(), 40.0);
    assert_eq!(record.total_hours_per_week(), 0.0);
    // 0 < 40 * 0.5
    assert_eq!(record.workload_status(), WorkloadStatus::Underloaded);

    let record = agg.create_record("T1", "2025-2026", "1", Some(30.0));
    assert_eq!(record.max_hours_per_week(), 30.0);
}

// ==========================================
// 重算 (recompute)
// ==========================================

#[test]
fn test_recompute_sums_six_categories() {
    let agg = aggregator();
    let record = agg.create_record("T1", "2025-2026", "1", None);

    let updated = agg.recompute(
        &record,
        &WorkloadUpdate {
            teaching_hours: Some(20.0),
            administrative_hours: Some(5.0),
            extracurricular_hours: Some(3.0),
            preparation_hours: Some(4.0),
            grading_hours: Some(4.0),
            other_duties_hours: Some(2.0),
            ..WorkloadUpdate::default()
        },
    );

    assert_eq!(updated.total_hours_per_week(), 38.0);
    assert_eq!(updated.total_hours_per_week(), round2(updated.category_sum()));
    assert_eq!(updated.workload_status(), WorkloadStatus::Normal);
}

#[test]
fn test_recompute_keeps_absent_fields() {
    let agg = aggregator();
    let record = agg.create_record("T1", "2025-2026", "1", None);
    let first = agg.recompute(
        &record,
        &WorkloadUpdate {
            teaching_hours: Some(18.0),
            administrative_hours: Some(4.5),
            notes: Some("教研组长".to_string()),
            ..WorkloadUpdate::default()
        },
    );

    let second = agg.recompute(
        &first,
        &WorkloadUpdate {
            grading_hours: Some(2.25),
            ..WorkloadUpdate::default()
        },
    );

    assert_eq!(second.teaching_hours(), 18.0);
    assert_eq!(second.administrative_hours(), 4.5);
    assert_eq!(second.grading_hours(), 2.25);
    assert_eq!(second.notes.as_deref(), Some("教研组长"));
    assert_eq!(second.total_hours_per_week(), 24.75);
}

#[test]
fn test_recompute_is_idempotent() {
    let agg = aggregator();
    let record = agg.create_record("T1", "2025-2026", "1", None);
    let updates = WorkloadUpdate {
        teaching_hours: Some(16.333),
        other_duties_hours: Some(1.111),
        ..WorkloadUpdate::default()
    };

    let once = agg.recompute(&record, &updates);
    let twice = agg.recompute(&once, &updates);

    assert_eq!(once, twice);
    assert_eq!(once.total_hours_per_week(), 17.44);
}

#[test]
fn test_status_boundaries() {
    let agg = aggregator();

    // 上限 40, 欠负荷阈值 20
    let cases = [
        (41.0, WorkloadStatus::Overloaded),
        (40.01, WorkloadStatus::Overloaded),
        (40.0, WorkloadStatus::Normal),
        (20.0, WorkloadStatus::Normal),
        (19.99, WorkloadStatus::Underloaded),
        (0.0, WorkloadStatus::Underloaded),
    ];

    for (total, expected) in cases {
        let record = record_with_total(&agg, "T1", total);
        assert_eq!(record.workload_status(), expected, "total={}", total);
        assert_eq!(
            record.workload_status() == WorkloadStatus::Overloaded,
            record.total_hours_per_week() > record.max_hours_per_week()
        );
    }
}

#[test]
fn test_ceiling_change_reclassifies() {
    let agg = aggregator();
    let record = record_with_total(&agg, "T1", 35.0);
    assert_eq!(record.workload_status(), WorkloadStatus::Normal);

    let lowered = agg.recompute(
        &record,
        &WorkloadUpdate {
            max_hours_per_week: Some(30.0),
            ..WorkloadUpdate::default()
        },
    );
    assert_eq!(lowered.workload_status(), WorkloadStatus::Overloaded);
    assert_eq!(lowered.total_hours_per_week(), 35.0);
}

#[test]
fn test_zero_threshold_disables_underload() {
    let agg = WorkloadAggregator::new(WorkloadConfig {
        underload_threshold: 0.0,
        ..WorkloadConfig::default()
    })
    .unwrap();

    let record = record_with_total(&agg, "T1", 0.0);
    assert_eq!(record.workload_status(), WorkloadStatus::Normal);
}

#[test]
fn test_non_positive_max_hours_reports_overloaded() {
    let agg = aggregator();
    let record = agg.create_record("T1", "2025-2026", "1", None);

    // 上限为 -1: 零工时也超过上限, 不会同时判为工作量不足
    let negative = agg.recompute(
        &record,
        &WorkloadUpdate {
            max_hours_per_week: Some(-1.0),
            ..WorkloadUpdate::default()
        },
    );
    assert_eq!(negative.total_hours_per_week(), 0.0);
    assert_eq!(negative.workload_status(), WorkloadStatus::Overloaded);

    // 上限为 0: 有工时即超负荷, 零工时为正常
    let zero = agg.recompute(
        &record,
        &WorkloadUpdate {
            max_hours_per_week: Some(0.0),
            teaching_hours: Some(1.0),
            ..WorkloadUpdate::default()
        },
    );
    assert_eq!(zero.workload_status(), WorkloadStatus::Overloaded);
    assert_eq!(agg.classify(0.0, 0.0), WorkloadStatus::Normal);

    for (total, max) in [(0.0, -1.0), (1.0, 0.0), (5.0, -10.0)] {
        let status = agg.classify(total, max);
        let flags = [
            status == WorkloadStatus::Overloaded,
            status == WorkloadStatus::Underloaded,
            status == WorkloadStatus::Normal,
        ];
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
        assert_eq!(status, WorkloadStatus::Overloaded);
    }
}

// ==========================================
// 课表推导 (derive_from_schedule)
// ==========================================

#[test]
fn test_derive_two_ninety_minute_classes() {
    let agg = aggregator();
    let rows = vec![
        schedule_row("s1", "T1", DayOfWeek::Monday, t(8, 0), t(9, 30)),
        schedule_row("s2", "T1", DayOfWeek::Wednesday, t(13, 0), t(14, 30)),
    ];

    let record = agg.derive_from_schedule("T1", "2025-2026", "1", &rows, None);

    assert_eq!(record.teaching_hours(), 3.0);
    assert_eq!(record.preparation_hours(), 1.5);
    assert_eq!(record.grading_hours(), 0.9);
    assert_eq!(record.total_hours_per_week(), 5.4);
    assert_eq!(record.max_hours_per_week(), 40.0);
    assert_eq!(record.workload_status(), WorkloadStatus::Underloaded);
}

#[test]
fn test_derive_ignores_other_teachers_rows() {
    let agg = aggregator();
    let rows = vec![
        schedule_row("s1", "T1", DayOfWeek::Monday, t(8, 0), t(9, 0)),
        schedule_row("s2", "T2", DayOfWeek::Monday, t(8, 0), t(12, 0)),
    ];

    let record = agg.derive_from_schedule("T1", "2025-2026", "1", &rows, None);

    assert_eq!(record.teaching_hours(), 1.0);
}

#[test]
fn test_derive_skips_non_positive_durations() {
    let agg = aggregator();
    let rows = vec![
        schedule_row("s1", "T1", DayOfWeek::Monday, t(8, 0), t(8, 45)),
        schedule_row("bad", "T1", DayOfWeek::Monday, t(10, 0), t(9, 0)),
    ];

    let hours = agg.teaching_hours_from_schedule("T1", &rows);
    assert_eq!(hours, 0.75);
}

#[test]
fn test_derive_updates_existing_record_in_place() {
    let agg = aggregator();
    let existing = agg.recompute(
        &agg.create_record("T1", "2025-2026", "1", Some(30.0)),
        &WorkloadUpdate {
            teaching_hours: Some(99.0),
            administrative_hours: Some(6.0),
            extracurricular_hours: Some(2.0),
            other_duties_hours: Some(1.0),
            notes: Some("保留".to_string()),
            ..WorkloadUpdate::default()
        },
    );
    assert_eq!(existing.workload_status(), WorkloadStatus::Overloaded);

    let rows = vec![
        schedule_row("s1", "T1", DayOfWeek::Monday, t(8, 0), t(10, 0)),
        schedule_row("s2", "T1", DayOfWeek::Tuesday, t(8, 0), t(10, 0)),
        schedule_row("s3", "T1", DayOfWeek::Thursday, t(8, 0), t(14, 0)),
        schedule_row("s4", "T1", DayOfWeek::Friday, t(8, 0), t(10, 0)),
    ];

    let record = agg.derive_from_schedule("T1", "2025-2026", "1", &rows, Some(&existing));

    // 12h 授课 + 6 备课 + 3.6 批改 + 行政 6 + 课外 2 + 其他 1
    assert_eq!(record.teaching_hours(), 12.0);
    assert_eq!(record.preparation_hours(), 6.0);
    assert_eq!(record.grading_hours(), 3.6);
    assert_eq!(record.administrative_hours(), 6.0);
    assert_eq!(record.extracurricular_hours(), 2.0);
    assert_eq!(record.other_duties_hours(), 1.0);
    assert_eq!(record.max_hours_per_week(), 30.0);
    assert_eq!(record.total_hours_per_week(), 30.6);
    assert_eq!(record.workload_status(), WorkloadStatus::Overloaded);
    assert_eq!(record.notes.as_deref(), Some("保留"));
}

#[test]
fn test_derive_with_custom_ratios() {
    let agg = WorkloadAggregator::new(WorkloadConfig {
        preparation_ratio: 0.25,
        grading_ratio: 0.1,
        default_max_hours_per_week: 20.0,
        ..WorkloadConfig::default()
    })
    .unwrap();
    let rows = vec![schedule_row("s1", "T1", DayOfWeek::Monday, t(8, 0), t(12, 0))];

    let record = agg.derive_from_schedule("T1", "2025-2026", "2", &rows, None);

    assert_eq!(record.preparation_hours(), 1.0);
    assert_eq!(record.grading_hours(), 0.4);
    assert_eq!(record.max_hours_per_week(), 20.0);
    assert_eq!(record.total_hours_per_week(), 5.4);
}

#[test]
fn test_derive_without_rows_yields_zero_teaching() {
    let agg = aggregator();
    let record = agg.derive_from_schedule("T9", "2025-2026", "1", &[], None);

    assert_eq!(record.teaching_hours(), 0.0);
    assert_eq!(record.total_hours_per_week(), 0.0);
    assert_eq!(record.teacher_id, "T9");
}

// ==========================================
// 学期统计 (summarize)
// ==========================================

#[test]
fn test_summarize_counts_and_percentages() {
    let agg = aggregator();
    let records = vec![
        record_with_total(&agg, "T1", 45.0),
        record_with_total(&agg, "T2", 10.0),
        record_with_total(&agg, "T3", 30.0),
        record_with_total(&agg, "T4", 25.0),
    ];

    let summary = agg.summarize("2025-2026", "1", &records);

    assert_eq!(summary.total_teachers, 4);
    assert_eq!(summary.overloaded_count, 1);
    assert_eq!(summary.underloaded_count, 1);
    assert_eq!(summary.normal_count, 2);
    assert_eq!(summary.overloaded_percentage, 25.0);
    assert_eq!(summary.underloaded_percentage, 25.0);
    assert_eq!(summary.normal_percentage, 50.0);
    assert_eq!(summary.average_hours_per_week, 27.5);
    assert_eq!(summary.average_max_hours, 40.0);
    assert_eq!(summary.average_utilization, 68.75);
}

#[test]
fn test_summarize_counts_always_sum_to_total() {
    let agg = aggregator();
    let records = vec![
        record_with_total(&agg, "T1", 41.0),
        record_with_total(&agg, "T2", 22.0),
        record_with_total(&agg, "T3", 21.0),
    ];

    let summary = agg.summarize("2025-2026", "1", &records);

    assert_eq!(
        summary.overloaded_count + summary.underloaded_count + summary.normal_count,
        summary.total_teachers
    );
    assert_eq!(summary.overloaded_percentage, 33.33);
    assert_eq!(summary.normal_percentage, 66.67);
}

#[test]
fn test_summarize_empty_is_all_zero() {
    let agg = aggregator();
    let summary = agg.summarize("2025-2026", "2", &[]);

    assert_eq!(summary.total_teachers, 0);
    assert_eq!(summary.normal_count, 0);
    for value in [
        summary.overloaded_percentage,
        summary.underloaded_percentage,
        summary.normal_percentage,
        summary.average_hours_per_week,
        summary.average_max_hours,
        summary.average_utilization,
    ] {
        assert_eq!(value, 0.0);
        assert!(!value.is_nan());
    }
}
