// ==========================================
// 课表冲突检测与工作量引擎 - 教师数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 用途: 工作量推导前的教师存在性校验
// ==========================================

use crate::domain::teacher::Teacher;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// TeacherRepository - 教师仓储
// ==========================================
pub struct TeacherRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TeacherRepository {
    /// 从已有连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入教师
    ///
    /// # 返回
    /// - Err(UniqueConstraintViolation): teacher_id 已存在
    pub fn insert(&self, teacher: &Teacher) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO teacher (teacher_id, name) VALUES (?1, ?2)",
            params![teacher.teacher_id, teacher.name],
        )?;
        Ok(())
    }

    /// 按ID查询教师
    ///
    /// # 返回
    /// - Ok(Some(Teacher)): 找到
    /// - Ok(None): 未找到
    pub fn find_by_id(&self, teacher_id: &str) -> RepositoryResult<Option<Teacher>> {
        let conn = self.get_conn()?;

        let teacher = conn
            .query_row(
                "SELECT teacher_id, name FROM teacher WHERE teacher_id = ?1",
                params![teacher_id],
                |row| {
                    Ok(Teacher {
                        teacher_id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(teacher)
    }
}
