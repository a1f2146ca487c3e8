// ==========================================
// 课表冲突检测与工作量引擎 - 工作量配置
// ==========================================
// 红线: 配置错误在加载时拒绝, 不在每次计算时检查
// ==========================================

use crate::config::config_manager::config_keys;
use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// 标准周课时上限
pub const DEFAULT_MAX_HOURS_PER_WEEK: f64 = 40.0;
/// 欠负荷阈值 (上限的比例)
pub const DEFAULT_UNDERLOAD_THRESHOLD: f64 = 0.5;
/// 备课工时 = 授课工时 * 0.5
pub const DEFAULT_PREPARATION_RATIO: f64 = 0.5;
/// 批改工时 = 授课工时 * 0.3
pub const DEFAULT_GRADING_RATIO: f64 = 0.3;

// ==========================================
// WorkloadConfig - 工作量计算参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// 新建记录的默认周上限
    pub default_max_hours_per_week: f64,
    /// total < max * underload_threshold 判定为欠负荷
    pub underload_threshold: f64,
    /// 由课表推导时的备课系数
    pub preparation_ratio: f64,
    /// 由课表推导时的批改系数
    pub grading_ratio: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            default_max_hours_per_week: DEFAULT_MAX_HOURS_PER_WEEK,
            underload_threshold: DEFAULT_UNDERLOAD_THRESHOLD,
            preparation_ratio: DEFAULT_PREPARATION_RATIO,
            grading_ratio: DEFAULT_GRADING_RATIO,
        }
    }
}

impl WorkloadConfig {
    /// 验证配置有效性
    ///
    /// # 验证规则
    /// 1. 默认上限必须为正数
    /// 2. 欠负荷阈值必须在 [0.0, 1.0) 内
    /// 3. 备课/批改系数不能为负
    pub fn validate(&self) -> ConfigResult<()> {
        let max = self.default_max_hours_per_week;
        if !max.is_finite() || max <= 0.0 {
            return Err(invalid(
                config_keys::WORKLOAD_DEFAULT_MAX_HOURS,
                max,
                "周上限必须为正数",
            ));
        }

        let threshold = self.underload_threshold;
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            return Err(invalid(
                config_keys::WORKLOAD_UNDERLOAD_THRESHOLD,
                threshold,
                "欠负荷阈值必须在 [0, 1) 范围内",
            ));
        }

        for (key, ratio) in [
            (config_keys::WORKLOAD_PREPARATION_RATIO, self.preparation_ratio),
            (config_keys::WORKLOAD_GRADING_RATIO, self.grading_ratio),
        ] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(invalid(key, ratio, "系数不能为负数"));
            }
        }

        Ok(())
    }
}

fn invalid(key: &str, value: f64, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
