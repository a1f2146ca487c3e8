// ==========================================
// 课表冲突检测与工作量引擎 - 课表条目数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑, 冲突检测由引擎完成
// 说明: 查询结果 LEFT JOIN class_subject, 关联缺失时 assignment 为 None
// ==========================================

mod core;
mod queries;


pub use self::core::ScheduleEntryRepository;
