// ==========================================
// 课表冲突检测与工作量引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod conflict;
pub mod schedule;
pub mod teacher;
pub mod types;
pub mod workload;

// 重导出核心类型
pub use conflict::{ConflictEntry, ConflictReport};
pub use schedule::{ClassSubjectAssignment, ScheduleEntry, TimeSlot};
pub use teacher::Teacher;
pub use types::{ConflictType, DayOfWeek, WorkloadStatus};
pub use workload::{WorkloadRecord, WorkloadSummary, WorkloadUpdate};
