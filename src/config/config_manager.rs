// ==========================================
// TalentoPlus 人事管理系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 覆写: 密钥类配置优先读取环境变量
// ==========================================

use crate::auth::jwt::{
    JwtConfig, DEFAULT_JWT_AUDIENCE, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_JWT_ISSUER,
    DEFAULT_JWT_SECRET,
};
use crate::config::import_config_trait::{CatalogDefaults, ImportConfigReader};
use crate::db::open_sqlite_connection;
use crate::engine::query_classifier::{
    RemoteLlmConfig, DEFAULT_LLM_ENDPOINT, DEFAULT_LLM_TIMEOUT_SECS,
};
use crate::i18n::DEFAULT_LOCALE;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

/// 初始管理员口令默认值
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin123!";

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
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        self.get_config_value(key)
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(key)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 环境变量优先，其次 config_kv，最后默认值
    fn get_env_or_config(&self, env_key: &str, key: &str, default: &str) -> RepositoryResult<String> {
        if let Some(value) = env_override(env_key) {
            return Ok(value);
        }
        self.get_config_or_default(key, default)
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::debug!(config_key = key, "配置已更新");
        Ok(())
    }

    // ===== 应用配置 =====

    /// 界面/消息语言（默认 es）
    pub fn get_locale(&self) -> RepositoryResult<String> {
        self.get_config_or_default(config_keys::APP_LOCALE, DEFAULT_LOCALE)
    }

    // ===== 认证配置 =====

    /// JWT 配置（密钥可由 TALENTO_JWT_SECRET 覆盖）
    pub fn get_jwt_config(&self) -> RepositoryResult<JwtConfig> {
        let secret =
            self.get_env_or_config(env_keys::JWT_SECRET, config_keys::JWT_SECRET, DEFAULT_JWT_SECRET)?;
        let issuer = self.get_config_or_default(config_keys::JWT_ISSUER, DEFAULT_JWT_ISSUER)?;
        let audience = self.get_config_or_default(config_keys::JWT_AUDIENCE, DEFAULT_JWT_AUDIENCE)?;

        let raw_hours = self.get_config_or_default(
            config_keys::JWT_EXPIRATION_HOURS,
            &DEFAULT_JWT_EXPIRATION_HOURS.to_string(),
        )?;
        let expiration_hours = match raw_hours.trim().parse::<i64>() {
            Ok(h) if h > 0 => h,
            _ => {
                tracing::warn!(
                    config_key = config_keys::JWT_EXPIRATION_HOURS,
                    raw_value = %raw_hours,
                    "JWT 有效期配置非法，使用默认值"
                );
                DEFAULT_JWT_EXPIRATION_HOURS
            }
        };

        Ok(JwtConfig {
            secret,
            expiration_hours,
            issuer,
            audience,
        })
    }

    /// 初始管理员口令（仅首次播种时使用）
    pub fn get_admin_seed_password(&self) -> RepositoryResult<String> {
        self.get_env_or_config(
            env_keys::ADMIN_PASSWORD,
            config_keys::ADMIN_SEED_PASSWORD,
            DEFAULT_ADMIN_PASSWORD,
        )
    }

    // ===== 问答配置 =====

    /// 远程分类配置（API Key 可由 TALENTO_AI_API_KEY 覆盖）
    pub fn get_llm_config(&self) -> RepositoryResult<RemoteLlmConfig> {
        let api_key = match env_override(env_keys::AI_API_KEY) {
            Some(key) => Some(key),
            None => self
                .get_config_value(config_keys::AI_API_KEY)?
                .filter(|v| !v.trim().is_empty()),
        };
        let endpoint = self.get_config_or_default(config_keys::AI_ENDPOINT, DEFAULT_LLM_ENDPOINT)?;
        let timeout_secs = self
            .get_config_or_default(
                config_keys::AI_TIMEOUT_SECS,
                &DEFAULT_LLM_TIMEOUT_SECS.to_string(),
            )?
            .trim()
            .parse::<u64>()
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS);

        Ok(RemoteLlmConfig {
            api_key,
            endpoint,
            timeout_secs,
        })
    }
}

/// 读取非空环境变量
fn env_override(env_key: &str) -> Option<String> {
    std::env::var(env_key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ==========================================
// ImportConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_catalog_defaults(&self) -> RepositoryResult<CatalogDefaults> {
        let base = CatalogDefaults::default();
        Ok(CatalogDefaults {
            department: self.get_config_or_default(config_keys::DEFAULT_DEPARTMENT, &base.department)?,
            position: self.get_config_or_default(config_keys::DEFAULT_POSITION, &base.position)?,
            status: self.get_config_or_default(config_keys::DEFAULT_STATUS, &base.status)?,
            education_level: self
                .get_config_or_default(config_keys::DEFAULT_EDUCATION_LEVEL, &base.education_level)?,
            registration_position: self.get_config_or_default(
                config_keys::REGISTRATION_POSITION,
                &base.registration_position,
            )?,
        })
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 应用
    pub const APP_LOCALE: &str = "app.locale";

    // 认证
    pub const JWT_SECRET: &str = "auth.jwt_secret";
    pub const JWT_ISSUER: &str = "auth.jwt_issuer";
    pub const JWT_AUDIENCE: &str = "auth.jwt_audience";
    pub const JWT_EXPIRATION_HOURS: &str = "auth.jwt_expiration_hours";
    pub const ADMIN_SEED_PASSWORD: &str = "auth.admin_seed_password";

    // 问答
    pub const AI_API_KEY: &str = "ai.api_key";
    pub const AI_ENDPOINT: &str = "ai.endpoint";
    pub const AI_TIMEOUT_SECS: &str = "ai.timeout_secs";

    // 目录兜底
    pub const DEFAULT_DEPARTMENT: &str = "catalog.default_department";
    pub const DEFAULT_POSITION: &str = "catalog.default_position";
    pub const DEFAULT_STATUS: &str = "catalog.default_status";
    pub const DEFAULT_EDUCATION_LEVEL: &str = "catalog.default_education_level";
    pub const REGISTRATION_POSITION: &str = "catalog.registration_position";
}

/// 环境变量名
pub mod env_keys {
    pub const JWT_SECRET: &str = "TALENTO_JWT_SECRET";
    pub const AI_API_KEY: &str = "TALENTO_AI_API_KEY";
    pub const ADMIN_PASSWORD: &str = "TALENTO_ADMIN_PASSWORD";
    pub const DB_PATH: &str = "TALENTO_PLUS_DB_PATH";
}
