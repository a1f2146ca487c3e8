// ==========================================
// 课表冲突检测与工作量引擎 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置值无效 (key={key}, value={value}): {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("配置读取失败: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
