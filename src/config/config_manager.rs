// ==========================================
// 课表冲突检测与工作量引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::workload_config::{
    WorkloadConfig, DEFAULT_GRADING_RATIO, DEFAULT_MAX_HOURS_PER_WEEK, DEFAULT_PREPARATION_RATIO,
    DEFAULT_UNDERLOAD_THRESHOLD,
};
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// 全局作用域
const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;

        info!(key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 读取所有 global 配置
    pub fn list_config_values(&self) -> ConfigResult<HashMap<String, String>> {
        let conn = self.get_conn()?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(config_map)
    }

    /// 读取浮点配置, 缺失时使用默认值
    ///
    /// 注意: 存在但无法解析的值视为配置错误, 不静默回退
    fn get_f64_or_default(&self, key: &str, default: f64) -> ConfigResult<f64> {
        match self.get_config_value(key)? {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }),
        }
    }

    // ===== 工作量配置 =====

    /// 加载并校验工作量配置
    ///
    /// # 返回
    /// - Ok(WorkloadConfig): 校验通过的配置
    /// - Err(ConfigError::InvalidValue): 配置无法解析或超出范围
    pub fn load_workload_config(&self) -> ConfigResult<WorkloadConfig> {
        let config = WorkloadConfig {
            default_max_hours_per_week: self.get_f64_or_default(
                config_keys::WORKLOAD_DEFAULT_MAX_HOURS,
                DEFAULT_MAX_HOURS_PER_WEEK,
            )?,
            underload_threshold: self.get_f64_or_default(
                config_keys::WORKLOAD_UNDERLOAD_THRESHOLD,
                DEFAULT_UNDERLOAD_THRESHOLD,
            )?,
            preparation_ratio: self.get_f64_or_default(
                config_keys::WORKLOAD_PREPARATION_RATIO,
                DEFAULT_PREPARATION_RATIO,
            )?,
            grading_ratio: self.get_f64_or_default(
                config_keys::WORKLOAD_GRADING_RATIO,
                DEFAULT_GRADING_RATIO,
            )?,
        };

        config.validate()?;

        debug!(?config, "工作量配置已加载");
        Ok(config)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 工作量
    pub const WORKLOAD_DEFAULT_MAX_HOURS: &str = "workload_default_max_hours";
    pub const WORKLOAD_UNDERLOAD_THRESHOLD: &str = "workload_underload_threshold";
    pub const WORKLOAD_PREPARATION_RATIO: &str = "workload_preparation_ratio";
    pub const WORKLOAD_GRADING_RATIO: &str = "workload_grading_ratio";
}
