// ==========================================
// 课表冲突检测与工作量引擎 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 组合仓储与引擎
// ==========================================

pub mod error;
pub mod schedule_api;
pub mod workload_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use schedule_api::ScheduleApi;
pub use workload_api::WorkloadApi;
