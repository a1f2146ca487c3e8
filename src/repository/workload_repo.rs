// ==========================================
// 课表冲突检测与工作量引擎 - 教师工作量数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑, 派生字段由引擎计算后原样落库
// 主键: (teacher_id, academic_year, semester), upsert 原地覆盖
// ==========================================

use crate::domain::types::WorkloadStatus;
use crate::domain::workload::WorkloadRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

const SELECT_WORKLOAD: &str = r#"
    SELECT teacher_id, academic_year, semester, max_hours_per_week,
           teaching_hours, administrative_hours, extracurricular_hours,
           preparation_hours, grading_hours, other_duties_hours,
           total_hours_per_week, workload_status, notes
    FROM teacher_workload
"#;

// ==========================================
// WorkloadRepository - 教师工作量仓储
// ==========================================
pub struct WorkloadRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkloadRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按主键查询
    pub fn find_by_key(
        &self,
        teacher_id: &str,
        academic_year: &str,
        semester: &str,
    ) -> RepositoryResult<Option<WorkloadRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE teacher_id = ?1 AND academic_year = ?2 AND semester = ?3",
            SELECT_WORKLOAD
        );

        let record = conn
            .query_row(&sql, params![teacher_id, academic_year, semester], map_row)
            .optional()?;

        Ok(record)
    }

    /// 查询某学年学期的全部记录 (学期统计输入)
    pub fn find_by_term(
        &self,
        academic_year: &str,
        semester: &str,
    ) -> RepositoryResult<Vec<WorkloadRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE academic_year = ?1 AND semester = ?2 ORDER BY teacher_id",
            SELECT_WORKLOAD
        );

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![academic_year, semester], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// 查询某教师的历史记录 (按学年、学期倒序)
    pub fn find_by_teacher(&self, teacher_id: &str) -> RepositoryResult<Vec<WorkloadRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE teacher_id = ?1 ORDER BY academic_year DESC, semester DESC",
            SELECT_WORKLOAD
        );

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![teacher_id], map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// 插入或原地更新
    pub fn upsert(&self, record: &WorkloadRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO teacher_workload (
                teacher_id, academic_year, semester, max_hours_per_week,
                teaching_hours, administrative_hours, extracurricular_hours,
                preparation_hours, grading_hours, other_duties_hours,
                total_hours_per_week, workload_status, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            ON CONFLICT(teacher_id, academic_year, semester) DO UPDATE SET
                max_hours_per_week = excluded.max_hours_per_week,
                teaching_hours = excluded.teaching_hours,
                administrative_hours = excluded.administrative_hours,
                extracurricular_hours = excluded.extracurricular_hours,
                preparation_hours = excluded.preparation_hours,
                grading_hours = excluded.grading_hours,
                other_duties_hours = excluded.other_duties_hours,
                total_hours_per_week = excluded.total_hours_per_week,
                workload_status = excluded.workload_status,
                notes = excluded.notes,
                updated_at = datetime('now')
            "#,
            params![
                record.teacher_id,
                record.academic_year,
                record.semester,
                record.max_hours_per_week,
                record.teaching_hours,
                record.administrative_hours,
                record.extracurricular_hours,
                record.preparation_hours,
                record.grading_hours,
                record.other_duties_hours,
                record.total_hours_per_week,
                record.workload_status.to_db_str(),
                record.notes,
            ],
        )?;

        Ok(())
    }
}

/// 行映射
fn map_row(row: &Row) -> SqliteResult<WorkloadRecord> {
    let status_raw: String = row.get(11)?;
    let workload_status = WorkloadStatus::from_db_str(&status_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            11,
            Type::Text,
            format!("无效的工作量状态: {}", status_raw).into(),
        )
    })?;

    Ok(WorkloadRecord {
        teacher_id: row.get(0)?,
        academic_year: row.get(1)?,
        semester: row.get(2)?,
        max_hours_per_week: row.get(3)?,
        teaching_hours: row.get(4)?,
        administrative_hours: row.get(5)?,
        extracurricular_hours: row.get(6)?,
        preparation_hours: row.get(7)?,
        grading_hours: row.get(8)?,
        other_duties_hours: row.get(9)?,
        total_hours_per_week: row.get(10)?,
        workload_status,
        notes: row.get(12)?,
    })
}
