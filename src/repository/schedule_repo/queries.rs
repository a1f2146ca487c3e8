use super::core::ScheduleEntryRepository;
use crate::domain::schedule::{ClassSubjectAssignment, ScheduleEntry, TimeSlot};
use crate::domain::types::DayOfWeek;
use crate::repository::error::RepositoryResult;
use chrono::NaiveTime;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};
use tracing::debug;

/// 课表条目查询列 (与 map_row 顺序一致)
const SELECT_ENTRY: &str = r#"
    SELECT se.schedule_id, se.class_subject_id, se.day_of_week,
           se.start_time, se.end_time, se.room, se.teacher_id,
           cs.id, cs.teacher_id, cs.subject_id, cs.class_id
    FROM schedule_entry se
    LEFT JOIN class_subject cs ON cs.id = se.class_subject_id
"#;

/// 收集可读取的行
///
/// 字段无法转换的历史脏数据 (如非法时间文本) 跳过并记录, 不影响同日其他条目;
/// 其余数据库错误照常返回
fn collect_readable<I>(rows: I) -> SqliteResult<Vec<ScheduleEntry>>
where
    I: Iterator<Item = SqliteResult<ScheduleEntry>>,
{
    let mut entries = Vec::new();
    for row in rows {
        match row {
            Ok(entry) => entries.push(entry),
            Err(e @ rusqlite::Error::FromSqlConversionFailure(..))
            | Err(e @ rusqlite::Error::InvalidColumnType(..)) => {
                debug!(error = %e, "课表条目无法解析, 已跳过");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(entries)
}

impl ScheduleEntryRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 schedule_id 查询单个条目
    pub fn find_by_id(&self, schedule_id: &str) -> RepositoryResult<Option<ScheduleEntry>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE se.schedule_id = ?1", SELECT_ENTRY);

        let entry = conn
            .query_row(&sql, params![schedule_id], Self::map_row)
            .optional()?;

        Ok(entry)
    }

    /// 查询某一天的所有条目 (冲突检测的比较范围)
    pub fn find_by_day(&self, day: DayOfWeek) -> RepositoryResult<Vec<ScheduleEntry>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE se.day_of_week = ?1 ORDER BY se.start_time, se.schedule_id",
            SELECT_ENTRY
        );

        let mut stmt = conn.prepare(&sql)?;
        let entries = collect_readable(stmt.query_map(params![day.index()], Self::map_row)?)?;

        Ok(entries)
    }

    /// 查询某教师某一天的条目
    pub fn find_by_day_and_teacher(
        &self,
        day: DayOfWeek,
        teacher_id: &str,
    ) -> RepositoryResult<Vec<ScheduleEntry>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE se.day_of_week = ?1 AND TRIM(COALESCE(cs.teacher_id, se.teacher_id)) = ?2 \
             ORDER BY se.start_time, se.schedule_id",
            SELECT_ENTRY
        );

        let mut stmt = conn.prepare(&sql)?;
        let entries =
            collect_readable(stmt.query_map(params![day.index(), teacher_id], Self::map_row)?)?;

        Ok(entries)
    }

    /// 查询某教师的全部条目 (按星期、开始时间排序)
    pub fn find_by_teacher(&self, teacher_id: &str) -> RepositoryResult<Vec<ScheduleEntry>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE TRIM(COALESCE(cs.teacher_id, se.teacher_id)) = ?1 \
             ORDER BY se.day_of_week, se.start_time, se.schedule_id",
            SELECT_ENTRY
        );

        let mut stmt = conn.prepare(&sql)?;
        let entries = collect_readable(stmt.query_map(params![teacher_id], Self::map_row)?)?;

        Ok(entries)
    }

    /// 行映射
    fn map_row(row: &Row) -> SqliteResult<ScheduleEntry> {
        let day_index: i64 = row.get(2)?;
        let day_of_week = u8::try_from(day_index)
            .ok()
            .and_then(DayOfWeek::from_index)
            .ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    Type::Integer,
                    format!("无效的星期编码: {}", day_index).into(),
                )
            })?;

        let start_time: NaiveTime = row.get(3)?;
        let end_time: NaiveTime = row.get(4)?;

        let assignment = match row.get::<_, Option<String>>(7)? {
            Some(id) => Some(ClassSubjectAssignment {
                id,
                teacher_id: row.get(8)?,
                subject_id: row.get(9)?,
                class_id: row.get(10)?,
            }),
            None => None,
        };

        Ok(ScheduleEntry {
            schedule_id: row.get(0)?,
            slot: TimeSlot {
                day_of_week,
                start_time,
                end_time,
                room: row.get(5)?,
                teacher_id: row.get(6)?,
                class_subject_id: row.get(1)?,
            },
            assignment,
        })
    }
}
