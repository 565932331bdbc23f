// ==========================================
// TalentoPlus 人事管理系统 - 配置层
// ==========================================
// 职责: 系统配置管理,支持环境变量覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, env_keys, ConfigManager, DEFAULT_ADMIN_PASSWORD};
pub use import_config_trait::{CatalogDefaults, ImportConfigReader};
