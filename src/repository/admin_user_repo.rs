// ==========================================
// TalentoPlus 人事管理系统 - 管理员账号仓储
// ==========================================
// 红线: 只保存哈希，不接触明文口令
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

/// 管理员账号实体（admin_users 表）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUserEntity {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

pub struct AdminUserRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AdminUserRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按邮箱查找（大小写不敏感）
    pub fn find_by_email(&self, email: &str) -> RepositoryResult<Option<AdminUserEntity>> {
        let conn = self.get_conn()?;
        let user = conn
            .query_row(
                "SELECT id, email, full_name, password_hash, is_admin, created_at
                 FROM admin_users WHERE email = ?1 COLLATE NOCASE",
                params![email.trim()],
                |row| {
                    Ok(AdminUserEntity {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        full_name: row.get(2)?,
                        password_hash: row.get(3)?,
                        is_admin: row.get::<_, i64>(4)? != 0,
                        created_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// 插入账号；邮箱已存在时不做任何修改
    ///
    /// # 返回
    /// - true: 新插入
    /// - false: 已存在
    pub fn insert_if_absent(
        &self,
        email: &str,
        full_name: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "INSERT OR IGNORE INTO admin_users (email, full_name, password_hash, is_admin, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![email.trim(), full_name, password_hash, is_admin as i64, Utc::now()],
        )?;
        Ok(affected > 0)
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM admin_users", [], |row| row.get(0))?;
        Ok(count)
    }
}
