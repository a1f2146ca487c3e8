// ==========================================
// 课表冲突检测与工作量引擎 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod class_subject_repo;
pub mod error;
pub mod schedule_repo;
pub mod teacher_repo;
pub mod workload_repo;

// 重导出核心仓储
pub use class_subject_repo::ClassSubjectRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use schedule_repo::ScheduleEntryRepository;
pub use teacher_repo::TeacherRepository;
pub use workload_repo::WorkloadRepository;
