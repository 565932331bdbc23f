// ==========================================
// TalentoPlus 人事管理系统 - 导入层
// ==========================================
// 职责: 员工电子表格导入与目录对账
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod employee_importer_impl;
pub mod employee_importer_trait;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod result_aggregator;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use employee_importer_impl::EmployeeImporterImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use result_aggregator::{ImportTally, RowOutcome};

// 重导出 Trait 接口
pub use employee_importer_trait::{DataCleaner, EmployeeImporter, FieldMapper, FileParser, SheetRows};
