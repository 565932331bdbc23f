// ==========================================
// TalentoPlus 人事管理系统 - 员工导入命令行
// ==========================================
// 用法: import_employees <文件.xlsx|.csv> [db_path]
// 输出: ImportSummary JSON；success=false 时退出码为 1
// ==========================================

use std::error::Error;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use talento_plus::api::ImportApi;
use talento_plus::app::get_default_db_path;
use talento_plus::db::open_and_prepare;
use talento_plus::repository::{CatalogRepository, EmployeeRepository};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    talento_plus::logging::init();

    let Some(file_path) = std::env::args().nth(1) else {
        eprintln!("用法: import_employees <文件.xlsx|.csv> [db_path]");
        return Ok(ExitCode::from(2));
    };
    let db_path = std::env::args().nth(2).unwrap_or_else(get_default_db_path);

    let conn = Arc::new(Mutex::new(open_and_prepare(&db_path)?));
    let employees = Arc::new(EmployeeRepository::from_connection(conn.clone()));
    let catalogs = Arc::new(CatalogRepository::from_connection(conn.clone()));

    let config = talento_plus::config::ConfigManager::from_connection(conn.clone())?;
    talento_plus::i18n::set_locale(&config.get_locale()?);

    let import_api = ImportApi::new(conn, employees, catalogs)?;
    let summary = import_api.import_file(&file_path).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if summary.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
