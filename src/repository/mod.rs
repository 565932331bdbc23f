// ==========================================
// TalentoPlus 人事管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod admin_user_repo;
pub mod catalog_repo;
pub mod employee_repo;
pub mod error;

// 重导出核心仓储
pub use admin_user_repo::{AdminUserEntity, AdminUserRepository};
pub use catalog_repo::{CatalogRepository, CatalogStore};
pub use employee_repo::{EmployeeRepository, EmployeeStore};
pub use error::{RepositoryError, RepositoryResult};
