// ==========================================
// TalentoPlus 人事管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供 HTTP 外壳或命令行调用
// ==========================================

pub mod auth_api;
pub mod catalog_api;
pub mod dashboard_api;
pub mod employee_api;
pub mod error;
pub mod import_api;
pub mod registration_api;

// 重导出核心类型
pub use auth_api::{AdminLoginRequest, AuthApi, EmployeeLoginRequest, LoginResponse};
pub use catalog_api::CatalogApi;
pub use dashboard_api::DashboardApi;
pub use employee_api::EmployeeApi;
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use registration_api::RegistrationApi;
