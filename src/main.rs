// ==========================================
// 课表冲突检测与工作量引擎 - 命令行入口
// ==========================================
// 用法:
//   timetable-workload summary <academic_year> <semester>
//   timetable-workload calculate <teacher_id> <academic_year> <semester>
//   timetable-workload overloaded <academic_year> <semester>
// 数据库路径: TIMETABLE_WORKLOAD_DB_PATH 或用户数据目录
// ==========================================

use anyhow::{anyhow, bail, Context};
use timetable_workload::app::{get_default_db_path, AppState};
use timetable_workload::logging;

const USAGE: &str = "用法: timetable-workload <summary|overloaded> <学年> <学期> | calculate <教师ID> <学年> <学期>";

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", timetable_workload::APP_NAME);
    tracing::info!("系统版本: {}", timetable_workload::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let app_state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let output = match args.as_slice() {
        ["summary", year, semester] => {
            let summary = app_state
                .workload_api
                .get_summary(year, semester)
                .context("学期统计失败")?;
            serde_json::to_string_pretty(&summary)?
        }
        ["overloaded", year, semester] => {
            let records = app_state
                .workload_api
                .list_overloaded(year, semester)
                .context("查询超负荷教师失败")?;
            serde_json::to_string_pretty(&records)?
        }
        ["calculate", teacher_id, year, semester] => {
            let record = app_state
                .workload_api
                .calculate_from_schedule(teacher_id, year, semester)
                .context("课表工作量推导失败")?;
            serde_json::to_string_pretty(&record)?
        }
        [] => {
            println!("{}", USAGE);
            return Ok(());
        }
        _ => bail!("{}", USAGE),
    };

    println!("{}", output);
    Ok(())
}
