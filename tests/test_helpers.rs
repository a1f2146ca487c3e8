// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、基础数据录入等功能
// ==========================================
#![allow(dead_code)]

use chrono::NaiveTime;
use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;
use timetable_workload::app::AppState;
use timetable_workload::domain::{ClassSubjectAssignment, DayOfWeek, Teacher, TimeSlot};

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是合法 UTF-8")?
        .to_string();

    let conn = Connection::open(&db_path)?;
    timetable_workload::db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 写入测试配置 (覆盖默认值)
pub fn insert_test_config(db_path: &str, entries: &[(&str, &str)]) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    for (key, value) in entries {
        conn.execute(
            r#"
            INSERT OR REPLACE INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            "#,
            [key, value],
        )?;
    }
    Ok(())
}

// ==========================================
// TestEnv - 基于 AppState 的集成测试环境
// ==========================================
pub struct TestEnv {
    _temp_file: NamedTempFile,
    pub db_path: String,
    pub state: AppState,
}

impl TestEnv {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::with_config(&[])
    }

    /// 先写入配置再初始化 AppState
    pub fn with_config(entries: &[(&str, &str)]) -> Result<Self, Box<dyn Error>> {
        let (temp_file, db_path) = create_test_db()?;
        insert_test_config(&db_path, entries)?;
        let state = AppState::new(db_path.clone())?;
        Ok(Self {
            _temp_file: temp_file,
            db_path,
            state,
        })
    }

    /// 录入教师
    pub fn seed_teacher(&self, teacher_id: &str, name: &str) -> Result<(), Box<dyn Error>> {
        self.state.teacher_repo.insert(&Teacher {
            teacher_id: teacher_id.to_string(),
            name: name.to_string(),
        })?;
        Ok(())
    }

    /// 录入班级科目关联
    pub fn seed_assignment(
        &self,
        id: &str,
        teacher_id: &str,
        subject_id: &str,
        class_id: &str,
    ) -> Result<(), Box<dyn Error>> {
        self.state
            .class_subject_repo
            .insert(&ClassSubjectAssignment {
                id: id.to_string(),
                teacher_id: teacher_id.to_string(),
                subject_id: subject_id.to_string(),
                class_id: class_id.to_string(),
            })?;
        Ok(())
    }
}

/// 构造时间 (测试专用)
pub fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("非法测试时间")
}

/// 构造时间段 (测试专用)
pub fn slot(
    day: DayOfWeek,
    start: (u32, u32),
    end: (u32, u32),
    class_subject_id: &str,
    room: Option<&str>,
) -> TimeSlot {
    let slot = TimeSlot::new(day, t(start.0, start.1), t(end.0, end.1), class_subject_id);
    match room {
        Some(r) => slot.with_room(r),
        None => slot,
    }
}
