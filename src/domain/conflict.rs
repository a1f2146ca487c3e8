// ==========================================
// 课表冲突检测与工作量引擎 - 冲突报告
// ==========================================
// 每次检测重新生成, 不落库
// 空报告 = 无冲突, 可以保存
// ==========================================

use crate::domain::types::ConflictType;
use serde::{Deserialize, Serialize};

// ==========================================
// ConflictEntry - 单条冲突
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    pub message: String,
    /// 与之冲突的已有课表条目 (time_error / class_subject_not_found 时为空)
    pub conflicting_schedule_id: Option<String>,
}

impl ConflictEntry {
    pub fn new(conflict_type: ConflictType, message: String) -> Self {
        Self {
            conflict_type,
            message,
            conflicting_schedule_id: None,
        }
    }

    pub fn against(conflict_type: ConflictType, message: String, schedule_id: &str) -> Self {
        Self {
            conflict_type,
            message,
            conflicting_schedule_id: Some(schedule_id.to_string()),
        }
    }
}

// ==========================================
// ConflictReport - 冲突报告 (按发现顺序)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictReport {
    entries: Vec<ConflictEntry>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ConflictEntry) {
        self.entries.push(entry);
    }

    /// 无任何冲突
    pub fn is_clear(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ConflictEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ConflictEntry> {
        self.entries
    }

    pub fn has(&self, conflict_type: ConflictType) -> bool {
        self.entries.iter().any(|e| e.conflict_type == conflict_type)
    }

    pub fn count(&self, conflict_type: ConflictType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.conflict_type == conflict_type)
            .count()
    }

    /// 拼接所有冲突消息 (用于错误提示)
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
