// ==========================================
// TalentoPlus 人事管理系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::auth_api::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME};
use crate::api::{AuthApi, CatalogApi, DashboardApi, EmployeeApi, ImportApi, RegistrationApi};
use crate::auth::JwtService;
use crate::config::env_keys;
use crate::config::ConfigManager;
use crate::db::open_and_prepare;
use crate::engine::build_classifier;
use crate::repository::{AdminUserRepository, CatalogRepository, EmployeeRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源；所有仓储共用同一个连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    pub employee_api: Arc<EmployeeApi>,
    pub registration_api: Arc<RegistrationApi>,
    pub catalog_api: Arc<CatalogApi>,
    pub auth_api: Arc<AuthApi>,
    pub dashboard_api: Arc<DashboardApi>,

    /// 员工导入API
    pub import_api: Arc<ImportApi>,

    /// 配置管理器（供外壳层读取/修改配置）
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库、建表并写入初始目录（幂等）
    /// 2. 按配置设置语言
    /// 3. 写入种子管理员（幂等）
    /// 4. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "初始化AppState");

        let conn = open_and_prepare(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 配置
        // ==========================================
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法初始化ConfigManager: {}", e))?,
        );

        let locale = config_manager
            .get_locale()
            .map_err(|e| format!("读取语言配置失败: {}", e))?;
        crate::i18n::set_locale(&locale);

        let jwt_config = config_manager
            .get_jwt_config()
            .map_err(|e| format!("读取JWT配置失败: {}", e))?;
        let llm_config = config_manager
            .get_llm_config()
            .map_err(|e| format!("读取AI配置失败: {}", e))?;

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let employee_repo = Arc::new(EmployeeRepository::from_connection(conn.clone()));
        let catalog_repo = Arc::new(CatalogRepository::from_connection(conn.clone()));
        let admin_repo = Arc::new(AdminUserRepository::from_connection(conn.clone()));

        // ==========================================
        // 初始化API层
        // ==========================================
        let employee_api = Arc::new(EmployeeApi::new(employee_repo.clone(), catalog_repo.clone()));
        let registration_api = Arc::new(RegistrationApi::new(
            employee_repo.clone(),
            catalog_repo.clone(),
            config_manager.clone(),
        ));
        let catalog_api = Arc::new(CatalogApi::new(catalog_repo.clone()));
        let auth_api = Arc::new(AuthApi::new(
            admin_repo,
            employee_repo.clone(),
            JwtService::with_config(jwt_config),
        ));
        let dashboard_api = Arc::new(DashboardApi::new(
            employee_repo.clone(),
            build_classifier(llm_config),
        ));
        let import_api = Arc::new(
            ImportApi::new(conn, employee_repo, catalog_repo)
                .map_err(|e| format!("无法初始化ImportApi: {}", e))?,
        );

        // 种子管理员
        let admin_password = config_manager
            .get_admin_seed_password()
            .map_err(|e| format!("读取管理员口令配置失败: {}", e))?;
        auth_api
            .seed_admin(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME, &admin_password)
            .map_err(|e| format!("种子管理员写入失败: {}", e))?;

        tracing::info!(locale = %locale, "AppState初始化完成");

        Ok(Self {
            db_path,
            employee_api,
            registration_api,
            catalog_api,
            auth_api,
            dashboard_api,
            import_api,
            config_manager,
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
/// - 环境变量 TALENTO_PLUS_DB_PATH（非空时）
/// - 否则: 用户数据目录/talento-plus/talento_plus.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(env_keys::DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./talento_plus.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("talento-plus");
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!(error = %e, "无法创建数据目录，使用当前目录");
        } else {
            path = dir.join("talento_plus.db");
        }
    }

    path.to_string_lossy().to_string()
}
