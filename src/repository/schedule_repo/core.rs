use crate::domain::schedule::ScheduleEntry;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ScheduleEntryRepository - 课表条目仓储
// ==========================================
pub struct ScheduleEntryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ScheduleEntryRepository {
    /// 创建新的课表条目仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    pub(super) fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入课表条目
    ///
    /// # 返回
    /// - `Ok(schedule_id)`: 成功插入
    pub fn insert(&self, entry: &ScheduleEntry) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO schedule_entry (
                schedule_id, class_subject_id, day_of_week,
                start_time, end_time, room, teacher_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                entry.schedule_id,
                entry.slot.class_subject_id,
                entry.slot.day_of_week.index(),
                entry.slot.start_time,
                entry.slot.end_time,
                entry.slot.room,
                entry.teacher_id(),
            ],
        )?;

        Ok(entry.schedule_id.clone())
    }

    /// 更新课表条目
    ///
    /// # 返回
    /// - `Err(NotFound)`: schedule_id 不存在
    pub fn update(&self, entry: &ScheduleEntry) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let rows = conn.execute(
            r#"
            UPDATE schedule_entry SET
                class_subject_id = ?2,
                day_of_week = ?3,
                start_time = ?4,
                end_time = ?5,
                room = ?6,
                teacher_id = ?7
            WHERE schedule_id = ?1
            "#,
            params![
                entry.schedule_id,
                entry.slot.class_subject_id,
                entry.slot.day_of_week.index(),
                entry.slot.start_time,
                entry.slot.end_time,
                entry.slot.room,
                entry.teacher_id(),
            ],
        )?;

        if rows == 0 {
            return Err(RepositoryError::not_found("ScheduleEntry", &entry.schedule_id));
        }
        Ok(())
    }

    /// 删除课表条目
    ///
    /// # 返回
    /// - `Err(NotFound)`: schedule_id 不存在
    pub fn delete(&self, schedule_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let rows = conn.execute(
            "DELETE FROM schedule_entry WHERE schedule_id = ?1",
            params![schedule_id],
        )?;

        if rows == 0 {
            return Err(RepositoryError::not_found("ScheduleEntry", schedule_id));
        }
        Ok(())
    }
}
