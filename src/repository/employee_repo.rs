// ==========================================
// TalentoPlus 人事管理系统 - 员工数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化；日期以 YYYY-MM-DD 文本存储，薪资以十进制文本存储
// ==========================================

use crate::domain::catalog::CatalogKind;
use crate::domain::employee::{Employee, EmployeeView, NewEmployee};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// EmployeeStore Trait
// ==========================================
// 用途: 导入引擎与 API 层共用的员工数据访问接口
// 实现者: EmployeeRepository（使用 rusqlite）
pub trait EmployeeStore: Send + Sync {
    // ===== 自然键查询 =====

    /// 按证件号精确查找
    fn find_by_document(&self, document: &str) -> RepositoryResult<Option<Employee>>;

    fn exists_document(&self, document: &str) -> RepositoryResult<bool>;

    /// 邮箱是否已存在（大小写不敏感）
    fn exists_email(&self, email: &str) -> RepositoryResult<bool>;

    // ===== 写入 =====

    /// 插入新员工，返回带 id / created_at 的实体
    fn create(&self, employee: &NewEmployee) -> RepositoryResult<Employee>;

    /// 覆盖可变字段并刷新 updated_at（证件号与口令不变）
    fn update(&self, employee: &Employee) -> RepositoryResult<Employee>;

    /// 物理删除；记录不存在时返回 NotFound
    fn delete(&self, id: i64) -> RepositoryResult<()>;

    // ===== 主键查询 =====

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Employee>>;

    fn exists_id(&self, id: i64) -> RepositoryResult<bool>;

    // ===== 展示 / 统计 =====

    fn find_view_by_id(&self, id: i64) -> RepositoryResult<Option<EmployeeView>>;

    /// 全部员工（按 id 升序）
    fn list_views(&self) -> RepositoryResult<Vec<EmployeeView>>;

    fn count_all(&self) -> RepositoryResult<i64>;

    /// 按目录名称统计员工数（名称大小写不敏感的精确匹配）
    fn count_by_catalog_name(&self, kind: CatalogKind, name: &str) -> RepositoryResult<i64>;
}

const EMPLOYEE_COLUMNS: &str = "id, full_name, document, email, phone, address, birth_date, \
     hire_date, salary, professional_profile, password, department_id, position_id, \
     employee_status_id, education_level_id, created_at, updated_at";

const VIEW_SELECT: &str = r#"
    SELECT
        e.id, e.full_name, e.document, e.email, e.phone, e.address,
        e.birth_date, e.hire_date, e.salary, e.professional_profile,
        d.name, p.name, s.name, l.name
    FROM employees e
    JOIN departments d ON d.id = e.department_id
    JOIN positions p ON p.id = e.position_id
    JOIN employee_statuses s ON s.id = e.employee_status_id
    JOIN education_levels l ON l.id = e.education_level_id
"#;

// ==========================================
// EmployeeRepository - 员工仓储
// ==========================================
pub struct EmployeeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn find_by_id_locked(conn: &Connection, id: i64) -> RepositoryResult<Option<Employee>> {
        let employee = conn
            .query_row(
                &format!("SELECT {} FROM employees WHERE id = ?1", EMPLOYEE_COLUMNS),
                params![id],
                map_employee_row,
            )
            .optional()?;
        Ok(employee)
    }
}

/// 薪资列解析（文本 -> Decimal）
fn salary_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(raw.trim())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn map_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        full_name: row.get(1)?,
        document: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        address: row.get(5)?,
        birth_date: row.get(6)?,
        hire_date: row.get(7)?,
        salary: salary_column(row, 8)?,
        professional_profile: row.get(9)?,
        password: row.get(10)?,
        department_id: row.get(11)?,
        position_id: row.get(12)?,
        employee_status_id: row.get(13)?,
        education_level_id: row.get(14)?,
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
    })
}

fn map_view_row(row: &Row<'_>) -> rusqlite::Result<EmployeeView> {
    Ok(EmployeeView {
        id: row.get(0)?,
        full_name: row.get(1)?,
        document: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        address: row.get(5)?,
        birth_date: row.get(6)?,
        hire_date: row.get(7)?,
        salary: salary_column(row, 8)?,
        professional_profile: row.get(9)?,
        department_name: row.get(10)?,
        position_name: row.get(11)?,
        status_name: row.get(12)?,
        education_level_name: row.get(13)?,
    })
}

impl EmployeeStore for EmployeeRepository {
    fn find_by_document(&self, document: &str) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let employee = conn
            .query_row(
                &format!("SELECT {} FROM employees WHERE document = ?1", EMPLOYEE_COLUMNS),
                params![document],
                map_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn exists_document(&self, document: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM employees WHERE document = ?1 LIMIT 1",
                params![document],
                |_row| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn exists_email(&self, email: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM employees WHERE email = ?1 COLLATE NOCASE LIMIT 1",
                params![email.trim()],
                |_row| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn create(&self, employee: &NewEmployee) -> RepositoryResult<Employee> {
        let conn = self.get_conn()?;
        let now = Utc::now();

        conn.execute(
            r#"
            INSERT INTO employees (
                full_name, document, email, phone, address,
                birth_date, hire_date, salary, professional_profile, password,
                department_id, position_id, employee_status_id, education_level_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, NULL)
            "#,
            params![
                employee.full_name,
                employee.document,
                employee.email,
                employee.phone,
                employee.address,
                employee.birth_date,
                employee.hire_date,
                employee.salary.to_string(),
                employee.professional_profile,
                employee.password,
                employee.refs.department_id,
                employee.refs.position_id,
                employee.refs.employee_status_id,
                employee.refs.education_level_id,
                now,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::find_by_id_locked(&conn, id)?.ok_or_else(|| RepositoryError::NotFound {
            entity: "Employee".to_string(),
            id: id.to_string(),
        })
    }

    fn update(&self, employee: &Employee) -> RepositoryResult<Employee> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE employees SET
                full_name = ?2,
                email = ?3,
                phone = ?4,
                address = ?5,
                birth_date = ?6,
                hire_date = ?7,
                salary = ?8,
                professional_profile = ?9,
                department_id = ?10,
                position_id = ?11,
                employee_status_id = ?12,
                education_level_id = ?13,
                updated_at = ?14
            WHERE id = ?1
            "#,
            params![
                employee.id,
                employee.full_name,
                employee.email,
                employee.phone,
                employee.address,
                employee.birth_date,
                employee.hire_date,
                employee.salary.to_string(),
                employee.professional_profile,
                employee.department_id,
                employee.position_id,
                employee.employee_status_id,
                employee.education_level_id,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Employee".to_string(),
                id: employee.id.to_string(),
            });
        }

        Self::find_by_id_locked(&conn, employee.id)?.ok_or_else(|| RepositoryError::NotFound {
            entity: "Employee".to_string(),
            id: employee.id.to_string(),
        })
    }

    fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Employee".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        Self::find_by_id_locked(&conn, id)
    }

    fn exists_id(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row("SELECT 1 FROM employees WHERE id = ?1", params![id], |_row| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn find_view_by_id(&self, id: i64) -> RepositoryResult<Option<EmployeeView>> {
        let conn = self.get_conn()?;
        let view = conn
            .query_row(
                &format!("{} WHERE e.id = ?1", VIEW_SELECT),
                params![id],
                map_view_row,
            )
            .optional()?;
        Ok(view)
    }

    fn list_views(&self) -> RepositoryResult<Vec<EmployeeView>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY e.id ASC", VIEW_SELECT))?;
        let views = stmt
            .query_map([], map_view_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }

    fn count_all(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count)
    }

    fn count_by_catalog_name(&self, kind: CatalogKind, name: &str) -> RepositoryResult<i64> {
        let target = name.trim().to_lowercase();
        if target.is_empty() {
            return Ok(0);
        }

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT c.name, COUNT(e.id) FROM {table} c \
             LEFT JOIN employees e ON e.{fk} = c.id \
             GROUP BY c.id, c.name",
            table = kind.table_name(),
            fk = kind.foreign_key_column(),
        ))?;

        // 目录可能存在仅大小写不同的多条记录，全部计入
        let mut total = 0;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
        for row in rows {
            let (catalog_name, count) = row?;
            if catalog_name.trim().to_lowercase() == target {
                total += count;
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_schema, seed_catalogs};
    use crate::domain::catalog::CatalogRefs;
    use chrono::NaiveDate;

    fn repo() -> EmployeeRepository {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        seed_catalogs(&conn).unwrap();
        EmployeeRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn new_employee(document: &str, email: &str) -> NewEmployee {
        NewEmployee {
            full_name: "Ana Li".to_string(),
            document: document.to_string(),
            email: email.to_string(),
            phone: "3001234567".to_string(),
            address: "Calle 1".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            hire_date: NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
            salary: Decimal::from_str("2500000.50").unwrap(),
            professional_profile: String::new(),
            password: document.to_string(),
            refs: CatalogRefs {
                department_id: 1,
                position_id: 1,
                employee_status_id: 1,
                education_level_id: 1,
            },
        }
    }

    #[test]
    fn test_create_then_find_by_document() {
        let repo = repo();
        let created = repo.create(&new_employee("111", "ana@x.com")).unwrap();
        assert!(created.id > 0);
        assert!(created.updated_at.is_none());

        let found = repo.find_by_document("111").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.salary, Decimal::from_str("2500000.50").unwrap());
        assert_eq!(found.birth_date, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
    }

    #[test]
    fn test_email_uniqueness_is_case_insensitive() {
        let repo = repo();
        repo.create(&new_employee("111", "ana@x.com")).unwrap();

        assert!(repo.exists_email("ANA@X.COM").unwrap());
        let err = repo.create(&new_employee("222", "Ana@X.com")).unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[test]
    fn test_unknown_foreign_key_is_rejected() {
        let repo = repo();
        let mut employee = new_employee("111", "ana@x.com");
        employee.refs.department_id = 999;

        let err = repo.create(&employee).unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
    }

    #[test]
    fn test_update_sets_updated_at_and_keeps_document() {
        let repo = repo();
        let mut employee = repo.create(&new_employee("111", "ana@x.com")).unwrap();
        employee.full_name = "Ana María Li".to_string();
        employee.department_id = 2;

        let updated = repo.update(&employee).unwrap();
        assert_eq!(updated.full_name, "Ana María Li");
        assert_eq!(updated.document, "111");
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.created_at, employee.created_at);
    }

    #[test]
    fn test_delete_missing_returns_not_found() {
        let repo = repo();
        assert!(matches!(repo.delete(42), Err(RepositoryError::NotFound { .. })));
    }

    #[test]
    fn test_views_join_catalog_names() {
        let repo = repo();
        let created = repo.create(&new_employee("111", "ana@x.com")).unwrap();

        let view = repo.find_view_by_id(created.id).unwrap().unwrap();
        assert_eq!(view.department_name, "Tecnología");
        assert_eq!(view.status_name, "Activo");
        assert_eq!(repo.list_views().unwrap().len(), 1);
    }

    #[test]
    fn test_count_by_status_does_not_match_substrings() {
        let repo = repo();
        repo.create(&new_employee("111", "a@x.com")).unwrap();
        let mut inactive = new_employee("222", "b@x.com");
        inactive.refs.employee_status_id = 2;
        repo.create(&inactive).unwrap();

        assert_eq!(repo.count_by_catalog_name(CatalogKind::EmployeeStatus, "activo").unwrap(), 1);
        assert_eq!(repo.count_by_catalog_name(CatalogKind::EmployeeStatus, "Inactivo").unwrap(), 1);
        assert_eq!(repo.count_by_catalog_name(CatalogKind::EmployeeStatus, "Licencia").unwrap(), 0);
        assert_eq!(repo.count_all().unwrap(), 2);
    }
}
