// ==========================================
// TalentoPlus 人事管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 员工档案管理 + 电子表格批量导入
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 问答意图识别
pub mod engine;

// 导入层 - 员工电子表格
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 认证 - JWT 与口令
pub mod auth;

// 数据库基础设施（连接初始化/建表/初始目录）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    AiAnswer, CatalogEntry, CatalogKind, DashboardSummary, Employee, EmployeeView, ImportSummary,
    QueryIntent, SourceFormat,
};

// API
pub use api::{
    AuthApi, CatalogApi, DashboardApi, EmployeeApi, ImportApi, RegistrationApi,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "TalentoPlus";
