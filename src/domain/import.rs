// ==========================================
// TalentoPlus 人事管理系统 - 导入领域模型
// ==========================================
// 生命周期: 仅在单次导入流程内，不落库
// ==========================================

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 固定列数（14 列布局）
pub const EMPLOYEE_COLUMN_COUNT: usize = 14;

/// 表头所在的物理行号（1 起）
pub const HEADER_ROW_NUMBER: usize = 1;

// ==========================================
// SourceFormat - 输入格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Xlsx,
    Csv,
}

impl SourceFormat {
    /// 根据扩展名判断格式（大小写不敏感）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xlsx" | "xls" => Some(SourceFormat::Xlsx),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

// ==========================================
// RawEmployeeRow - 原始行
// ==========================================
// 用途: 文件解析产物，单元格已转为去空白文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEmployeeRow {
    /// 物理行号（1 起，表头为第 1 行）
    pub row_number: usize,
    /// 单元格文本（缺失单元格为空串）
    pub cells: Vec<String>,
}

impl RawEmployeeRow {
    pub fn new(row_number: usize, cells: Vec<String>) -> Self {
        Self { row_number, cells }
    }

    /// 读取第 idx 列（0 起）的去空白文本
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(|s| s.trim()).unwrap_or("")
    }
}

// ==========================================
// ParsedEmployeeRow - 规范化后的行
// ==========================================
// 用途: 字段映射产物，供对账引擎消费（不可变）
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEmployeeRow {
    pub row_number: usize,
    pub document: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub position_name: String,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    pub status_name: String,
    pub education_name: String,
    pub professional_profile: String,
    pub department_name: String,
}

impl ParsedEmployeeRow {
    /// 必填字段（姓名/证件号/邮箱）是否齐全
    pub fn has_required_fields(&self) -> bool {
        !self.full_name.is_empty() && !self.document.is_empty() && !self.email.is_empty()
    }
}

// ==========================================
// ImportSummary - 导入结果汇总
// ==========================================
// 注意: success=true 时 error_rows 仍可能 > 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub success: bool,
    pub total_rows: usize,
    pub imported_rows: usize,
    pub updated_rows: usize,
    pub error_rows: usize,
    pub errors: Vec<String>,
}

impl ImportSummary {
    /// 整体失败（无工作表等），不处理任何行
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            total_rows: 0,
            imported_rows: 0,
            updated_rows: 0,
            error_rows: 0,
            errors: vec![message.into()],
        }
    }
}
