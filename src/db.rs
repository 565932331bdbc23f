// ==========================================
// TalentoPlus 人事管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键/busy_timeout）
// - 建表与基础目录数据播种（幂等）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 初始部门
pub const SEED_DEPARTMENTS: &[&str] = &[
    "Tecnología",
    "Recursos Humanos",
    "Finanzas",
    "Marketing",
    "Operaciones",
];

/// 初始职位
pub const SEED_POSITIONS: &[&str] = &["Gerente", "Coordinador", "Analista", "Auxiliar", "Director"];

/// 初始员工状态
pub const SEED_STATUSES: &[&str] = &["Activo", "Inactivo", "Vacaciones", "Licencia"];

/// 初始学历
pub const SEED_EDUCATION_LEVELS: &[&str] = &[
    "Bachiller",
    "Técnico",
    "Tecnólogo",
    "Profesional",
    "Especialización",
    "Maestría",
    "Doctorado",
];

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表（幂等）
///
/// 目录表的 name 列没有唯一约束：大小写不敏感的“唯一”只由查找逻辑保证。
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL DEFAULT 'global',
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS departments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS positions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS employee_statuses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS education_levels (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            document TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE COLLATE NOCASE,
            phone TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            birth_date TEXT NOT NULL,
            hire_date TEXT NOT NULL,
            salary TEXT NOT NULL DEFAULT '0',
            professional_profile TEXT NOT NULL DEFAULT '',
            password TEXT NOT NULL,
            department_id INTEGER NOT NULL REFERENCES departments(id),
            position_id INTEGER NOT NULL REFERENCES positions(id),
            employee_status_id INTEGER NOT NULL REFERENCES employee_statuses(id),
            education_level_id INTEGER NOT NULL REFERENCES education_levels(id),
            created_at TEXT NOT NULL,
            updated_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_employees_department ON employees(department_id);
        CREATE INDEX IF NOT EXISTS idx_employees_status ON employees(employee_status_id);

        CREATE TABLE IF NOT EXISTS admin_users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE COLLATE NOCASE,
            full_name TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        params![CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 播种目录表（仅在表为空时写入）
///
/// # 返回
/// - 本次新写入的行数
pub fn seed_catalogs(conn: &Connection) -> rusqlite::Result<usize> {
    let mut inserted = 0;
    for (table, names) in [
        ("departments", SEED_DEPARTMENTS),
        ("positions", SEED_POSITIONS),
        ("employee_statuses", SEED_STATUSES),
        ("education_levels", SEED_EDUCATION_LEVELS),
    ] {
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        if count > 0 {
            continue;
        }

        let mut stmt = conn.prepare(&format!("INSERT INTO {} (name) VALUES (?1)", table))?;
        for name in names {
            stmt.execute(params![name])?;
            inserted += 1;
        }
    }

    Ok(inserted)
}

/// 打开数据库并完成建表 + 播种
pub fn open_and_prepare(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = open_sqlite_connection(db_path)?;
    init_schema(&conn)?;
    let seeded = seed_catalogs(&conn)?;
    if seeded > 0 {
        tracing::info!(db_path = %db_path, seeded, "目录表初始数据已写入");
    }
    Ok(conn)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
