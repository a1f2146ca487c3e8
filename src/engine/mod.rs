// ==========================================
// 课表冲突检测与工作量引擎 - 引擎层
// ==========================================
// 职责: 冲突检测与工作量计算, 不拼 SQL
// 红线: 纯函数, 无内部可变状态, 所有冲突必须输出 message
// ==========================================

pub mod conflict_detector;
pub mod error;
pub mod workload;

// 重导出核心引擎
pub use conflict_detector::ConflictDetector;
pub use error::{EngineError, EngineResult};
pub use workload::{round2, WorkloadAggregator};
