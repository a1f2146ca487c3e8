// ==========================================
// 课表冲突检测与工作量引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 功能: 课表时间段冲突检测 / 教师学期工作量统计
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ConflictType, DayOfWeek, WorkloadStatus};

// 领域实体
pub use domain::{
    ClassSubjectAssignment, ConflictEntry, ConflictReport, ScheduleEntry, Teacher, TimeSlot,
    WorkloadRecord, WorkloadSummary, WorkloadUpdate,
};

// 引擎
pub use engine::{ConflictDetector, WorkloadAggregator};

// API
pub use api::{ApiError, ApiResult, ScheduleApi, WorkloadApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "课表冲突检测与工作量引擎";
