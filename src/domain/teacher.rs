// ==========================================
// 课表冲突检测与工作量引擎 - 教师
// ==========================================
// 教师档案由外部持久层维护, 此处仅用于存在性校验
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub teacher_id: String, // 教师ID
    pub name: String,       // 姓名
}
