// ==========================================
// 课表冲突检测与工作量引擎 - 课表领域模型
// ==========================================
// 职责: 时间段 / 班级科目关联 / 课表条目
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

use crate::domain::types::DayOfWeek;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

// ==========================================
// TimeSlot - 每周时间段
// ==========================================
// 注: start_time < end_time 不在构造时强制,
//     违反时由冲突检测输出 time_error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day_of_week: DayOfWeek,         // 星期 (0-6)
    pub start_time: NaiveTime,          // 开始时间
    pub end_time: NaiveTime,            // 结束时间
    #[serde(default)]
    pub room: Option<String>,           // 教室
    #[serde(default)]
    pub teacher_id: Option<String>,     // 教师ID (可由关联补全)
    pub class_subject_id: String,       // 班级科目关联ID
}

impl TimeSlot {
    pub fn new(
        day_of_week: DayOfWeek,
        start_time: NaiveTime,
        end_time: NaiveTime,
        class_subject_id: &str,
    ) -> Self {
        Self {
            day_of_week,
            start_time,
            end_time,
            room: None,
            teacher_id: None,
            class_subject_id: class_subject_id.to_string(),
        }
    }

    pub fn with_room(mut self, room: &str) -> Self {
        self.room = Some(room.to_string());
        self
    }

    pub fn with_teacher(mut self, teacher_id: &str) -> Self {
        self.teacher_id = Some(teacher_id.to_string());
        self
    }

    /// 时间段是否合法 (start < end)
    pub fn is_well_formed(&self) -> bool {
        self.start_time < self.end_time
    }

    /// 半开区间重叠判定: [s1,e1) 与 [s2,e2) 重叠当且仅当 s1 < e2 且 e1 > s2
    ///
    /// 首尾相接 (e1 == s2) 不算重叠
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }

    /// 时长 (分钟), 非法时间段可能为负数
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// 非空教室 (去除首尾空白)
    pub fn normalized_room(&self) -> Option<&str> {
        self.room
            .as_deref()
            .map(str::trim)
            .filter(|room| !room.is_empty())
    }
}

// ==========================================
// ClassSubjectAssignment - 班级科目关联
// ==========================================
// 由外部持久层维护, 引擎只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSubjectAssignment {
    pub id: String,         // 关联ID
    pub teacher_id: String, // 任课教师
    pub subject_id: String, // 科目
    pub class_id: String,   // 班级
}

// ==========================================
// ScheduleEntry - 已持久化的课表条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub schedule_id: String,
    #[serde(flatten)]
    pub slot: TimeSlot,
    /// 关联记录缺失时为 None
    #[serde(default)]
    pub assignment: Option<ClassSubjectAssignment>,
}

impl ScheduleEntry {
    /// 条目所属教师: 优先取关联记录, 其次取时间段上的 teacher_id
    ///
    /// 返回值已去除首尾空白, 与候选时间段的教师按同一规则比较
    pub fn teacher_id(&self) -> Option<&str> {
        self.assignment
            .as_ref()
            .map(|a| a.teacher_id.as_str())
            .or(self.slot.teacher_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn room(&self) -> Option<&str> {
        self.slot.normalized_room()
    }
}
