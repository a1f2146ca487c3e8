// ==========================================
// 课表冲突检测与工作量引擎 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 引擎构造时配置校验失败
    #[error("引擎配置无效: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
