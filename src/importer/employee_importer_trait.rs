// ==========================================
// TalentoPlus 人事管理系统 - 员工导入 Trait 定义
// ==========================================
// 职责: 定义导入流水线各阶段接口（不包含实现）
// 流程: 文件解析 -> 字段映射(含清洗) -> 目录对账 -> 按证件号增改 -> 汇总
// ==========================================

use crate::domain::import::{ImportSummary, ParsedEmployeeRow, RawEmployeeRow, SourceFormat};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;

// ==========================================
// EmployeeImporter Trait - 导入主接口
// ==========================================
#[async_trait]
pub trait EmployeeImporter: Send + Sync {
    /// 从内存字节导入
    ///
    /// # 返回
    /// - Ok(ImportSummary): 行级错误已汇总在 errors 中
    /// - Err(ImportError): 字节无法解析为表格
    async fn import_from_bytes(
        &self,
        bytes: &[u8],
        format: SourceFormat,
    ) -> ImportResult<ImportSummary>;

    /// 从文件导入（按扩展名判断格式）
    async fn import_from_file(&self, file_path: &Path) -> ImportResult<ImportSummary>;
}

// ==========================================
// SheetRows - 解析产物
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRows {
    /// 工作簿中没有任何工作表
    NoWorksheet,
    /// 表头之后的物理行（第 2 行起，空白行也保留）
    Rows(Vec<RawEmployeeRow>),
}

// ==========================================
// FileParser Trait - 文件解析
// ==========================================
pub trait FileParser: Send + Sync {
    /// 将原始字节解析为行
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<SheetRows>;
}

// ==========================================
// DataCleaner Trait - 数据清洗
// ==========================================
pub trait DataCleaner: Send + Sync {
    /// 去首尾空白
    fn clean_text(&self, value: &str) -> String;

    /// 宽松日期解析；失败返回 None，由调用方决定兜底值
    fn parse_date_lenient(&self, value: &str) -> Option<NaiveDate>;

    /// 薪资解析；失败或为负时返回 0
    fn parse_salary(&self, value: &str) -> Decimal;
}

// ==========================================
// FieldMapper Trait - 字段映射
// ==========================================
pub trait FieldMapper: Send + Sync {
    /// 14 列固定布局 -> ParsedEmployeeRow（不做必填校验，不会失败）
    fn map_row(&self, row: &RawEmployeeRow, today: NaiveDate) -> ParsedEmployeeRow;
}
