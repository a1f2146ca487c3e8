// ==========================================
// 课表冲突检测与工作量引擎 - 领域类型定义
// ==========================================
// 职责: 星期、冲突类型、工作量状态等枚举
// 序列化格式: snake_case (与 REST 响应及数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 星期 (Day Of Week)
// ==========================================
// 编码: 0=周日 ... 6=周六
// 序列化为整数 0-6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// 全部星期 (按编码顺序)
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// 从整数编码解析 (0-6), 超出范围返回 None
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// 整数编码
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// 中文名称 (用于冲突提示)
    pub fn display_name(&self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "周日",
            DayOfWeek::Monday => "周一",
            DayOfWeek::Tuesday => "周二",
            DayOfWeek::Wednesday => "周三",
            DayOfWeek::Thursday => "周四",
            DayOfWeek::Friday => "周五",
            DayOfWeek::Saturday => "周六",
        }
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DayOfWeek::from_index(value).ok_or_else(|| format!("无效的星期编码: {} (应为 0-6)", value))
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.index()
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ==========================================
// 冲突类型 (Conflict Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    TeacherConflict,      // 同一教师时间重叠
    RoomConflict,         // 同一教室时间重叠
    TimeError,            // 开始时间不早于结束时间
    ClassSubjectNotFound, // 班级科目关联不存在
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ConflictType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ConflictType::TeacherConflict => "teacher_conflict",
            ConflictType::RoomConflict => "room_conflict",
            ConflictType::TimeError => "time_error",
            ConflictType::ClassSubjectNotFound => "class_subject_not_found",
        }
    }
}

// ==========================================
// 工作量状态 (Workload Status)
// ==========================================
// 判定顺序: overloaded > underloaded > normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadStatus {
    Overloaded,  // 超负荷
    Underloaded, // 欠负荷
    Normal,      // 正常
}

impl fmt::Display for WorkloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl WorkloadStatus {
    /// 从数据库字符串解析状态
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "overloaded" => Some(WorkloadStatus::Overloaded),
            "underloaded" => Some(WorkloadStatus::Underloaded),
            "normal" => Some(WorkloadStatus::Normal),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkloadStatus::Overloaded => "overloaded",
            WorkloadStatus::Underloaded => "underloaded",
            WorkloadStatus::Normal => "normal",
        }
    }
}
