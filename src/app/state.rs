// ==========================================
// 课表冲突检测与工作量引擎 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ScheduleApi, WorkloadApi};
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::engine::WorkloadAggregator;
use crate::repository::{
    ClassSubjectRepository, ScheduleEntryRepository, TeacherRepository, WorkloadRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源, 所有仓储共享同一个连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 课表API
    pub schedule_api: Arc<ScheduleApi>,

    /// 教师工作量API
    pub workload_api: Arc<WorkloadApi>,

    /// 配置管理器 (config_kv)
    pub config_manager: Arc<ConfigManager>,

    /// 教师仓储 (基础数据录入)
    pub teacher_repo: Arc<TeacherRepository>,

    /// 班级科目关联仓储 (基础数据录入)
    pub class_subject_repo: Arc<ClassSubjectRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开连接并初始化 schema
    /// 2. 读取并校验工作量配置
    /// 3. 创建所有Repository与API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("无法初始化数据库结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化配置与Engine层
        // ==========================================
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let workload_config = config_manager
            .load_workload_config()
            .map_err(|e| format!("工作量配置无效: {}", e))?;
        let aggregator = WorkloadAggregator::new(workload_config)
            .map_err(|e| format!("无法创建WorkloadAggregator: {}", e))?;

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let teacher_repo = Arc::new(TeacherRepository::new(conn.clone()));
        let class_subject_repo = Arc::new(ClassSubjectRepository::new(conn.clone()));
        let schedule_repo = Arc::new(ScheduleEntryRepository::new(conn.clone()));
        let workload_repo = Arc::new(WorkloadRepository::new(conn));

        // ==========================================
        // 初始化API层
        // ==========================================
        let schedule_api = Arc::new(ScheduleApi::new(
            schedule_repo.clone(),
            class_subject_repo.clone(),
        ));
        let workload_api = Arc::new(WorkloadApi::new(
            workload_repo,
            teacher_repo.clone(),
            schedule_repo,
            aggregator,
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            schedule_api,
            workload_api,
            config_manager,
            teacher_repo,
            class_subject_repo,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - TIMETABLE_WORKLOAD_DB_PATH 非空时直接使用
/// - 否则: 用户数据目录/timetable-workload/timetable_workload.db
/// - 无法获取用户数据目录时: ./timetable_workload.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("TIMETABLE_WORKLOAD_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./timetable_workload.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("timetable-workload");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("timetable_workload.db");
        }
    }

    path.to_string_lossy().to_string()
}
