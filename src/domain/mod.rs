// ==========================================
// TalentoPlus 人事管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、DTO 与值类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod catalog;
pub mod dashboard;
pub mod employee;
pub mod import;

// 重导出核心类型
pub use catalog::{CatalogEntry, CatalogKind, CatalogRefs};
pub use dashboard::{AiAnswer, DashboardSummary, QueryIntent};
pub use employee::{
    CreateEmployeeRequest, Employee, EmployeeRegistrationRequest, EmployeeView, NewEmployee,
    UpdateEmployeeRequest,
};
pub use import::{ImportSummary, ParsedEmployeeRow, RawEmployeeRow, SourceFormat};
