// ==========================================
// 课表冲突检测与工作量引擎 - 班级科目关联仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 关联记录的生命周期由外部持久层维护, 引擎只读
// ==========================================

use crate::domain::schedule::ClassSubjectAssignment;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ClassSubjectRepository - 班级科目关联仓储
// ==========================================
pub struct ClassSubjectRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ClassSubjectRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入关联记录
    pub fn insert(&self, assignment: &ClassSubjectAssignment) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO class_subject (id, teacher_id, subject_id, class_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                assignment.id,
                assignment.teacher_id,
                assignment.subject_id,
                assignment.class_id,
            ],
        )?;
        Ok(())
    }

    /// 按ID查询关联记录
    ///
    /// # 返回
    /// - Ok(None): 关联不存在 (冲突检测据此输出 class_subject_not_found)
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<ClassSubjectAssignment>> {
        let conn = self.get_conn()?;

        let assignment = conn
            .query_row(
                "SELECT id, teacher_id, subject_id, class_id FROM class_subject WHERE id = ?1",
                params![id],
                |row| {
                    Ok(ClassSubjectAssignment {
                        id: row.get(0)?,
                        teacher_id: row.get(1)?,
                        subject_id: row.get(2)?,
                        class_id: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(assignment)
    }
}
