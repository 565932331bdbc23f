// ==========================================
// TalentoPlus 人事管理系统 - 目录数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 名称查找大小写不敏感（Unicode 小写比较），重名取最小 id
// ==========================================

use crate::domain::catalog::{CatalogEntry, CatalogKind};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// CatalogStore Trait
// ==========================================
// 实现者: CatalogRepository（使用 rusqlite）
pub trait CatalogStore: Send + Sync {
    /// 按名称查找（去空白、大小写不敏感）
    fn find_by_name(&self, kind: CatalogKind, name: &str) -> RepositoryResult<Option<CatalogEntry>>;

    /// 新建目录条目（名称原样保存，仅去首尾空白）
    fn create(&self, kind: CatalogKind, name: &str) -> RepositoryResult<CatalogEntry>;

    /// 查找，不存在则创建
    fn resolve_or_register(&self, kind: CatalogKind, name: &str) -> RepositoryResult<CatalogEntry>;

    fn find_by_id(&self, kind: CatalogKind, id: i64) -> RepositoryResult<Option<CatalogEntry>>;

    /// 按 id 升序列出
    fn list(&self, kind: CatalogKind) -> RepositoryResult<Vec<CatalogEntry>>;
}

// ==========================================
// CatalogRepository - 目录仓储
// ==========================================
/// 四类目录共用一套实现，按 CatalogKind 选择数据表
pub struct CatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn find_by_name_locked(
        conn: &Connection,
        kind: CatalogKind,
        name: &str,
    ) -> RepositoryResult<Option<CatalogEntry>> {
        let target = name.trim().to_lowercase();
        if target.is_empty() {
            return Ok(None);
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT id, name FROM {} ORDER BY id ASC",
            kind.table_name()
        ))?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;

        for row in rows {
            let (id, stored) = row?;
            if stored.trim().to_lowercase() == target {
                return Ok(Some(CatalogEntry { id, kind, name: stored }));
            }
        }
        Ok(None)
    }

    fn create_locked(conn: &Connection, kind: CatalogKind, name: &str) -> RepositoryResult<CatalogEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: "name".to_string(),
                message: format!("{} 名称不能为空", kind),
            });
        }

        conn.execute(
            &format!("INSERT INTO {} (name) VALUES (?1)", kind.table_name()),
            params![name],
        )?;

        Ok(CatalogEntry {
            id: conn.last_insert_rowid(),
            kind,
            name: name.to_string(),
        })
    }
}

impl CatalogStore for CatalogRepository {
    fn find_by_name(&self, kind: CatalogKind, name: &str) -> RepositoryResult<Option<CatalogEntry>> {
        let conn = self.get_conn()?;
        Self::find_by_name_locked(&conn, kind, name)
    }

    fn create(&self, kind: CatalogKind, name: &str) -> RepositoryResult<CatalogEntry> {
        let conn = self.get_conn()?;
        Self::create_locked(&conn, kind, name)
    }

    fn resolve_or_register(&self, kind: CatalogKind, name: &str) -> RepositoryResult<CatalogEntry> {
        // 查找与创建在同一把锁内完成
        let conn = self.get_conn()?;
        if let Some(existing) = Self::find_by_name_locked(&conn, kind, name)? {
            return Ok(existing);
        }

        let created = Self::create_locked(&conn, kind, name)?;
        tracing::info!(
            catalog = %kind,
            id = created.id,
            name = %created.name,
            "目录条目不存在，已自动创建"
        );
        Ok(created)
    }

    fn find_by_id(&self, kind: CatalogKind, id: i64) -> RepositoryResult<Option<CatalogEntry>> {
        let conn = self.get_conn()?;
        let entry = conn
            .query_row(
                &format!("SELECT id, name FROM {} WHERE id = ?1", kind.table_name()),
                params![id],
                |row| {
                    Ok(CatalogEntry {
                        id: row.get(0)?,
                        kind,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    fn list(&self, kind: CatalogKind) -> RepositoryResult<Vec<CatalogEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name FROM {} ORDER BY id ASC",
            kind.table_name()
        ))?;

        let entries = stmt
            .query_map([], |row| {
                Ok(CatalogEntry {
                    id: row.get(0)?,
                    kind,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
