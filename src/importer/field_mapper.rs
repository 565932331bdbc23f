// ==========================================
// TalentoPlus 人事管理系统 - 字段映射器实现
// ==========================================
// 职责: 14 列固定布局 -> ParsedEmployeeRow + 类型转换
// 约束: 无 I/O；不做必填校验（由对账引擎负责）
// ==========================================

use crate::domain::import::{ParsedEmployeeRow, RawEmployeeRow};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::employee_importer_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait,
};
use chrono::NaiveDate;

/// 列位置（0 起）
pub mod columns {
    pub const DOCUMENT: usize = 0;
    pub const GIVEN_NAMES: usize = 1;
    pub const SURNAMES: usize = 2;
    pub const BIRTH_DATE: usize = 3;
    pub const ADDRESS: usize = 4;
    pub const PHONE: usize = 5;
    pub const EMAIL: usize = 6;
    pub const POSITION: usize = 7;
    pub const SALARY: usize = 8;
    pub const HIRE_DATE: usize = 9;
    pub const STATUS: usize = 10;
    pub const EDUCATION: usize = 11;
    pub const PROFESSIONAL_PROFILE: usize = 12;
    pub const DEPARTMENT: usize = 13;
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    fn text(&self, row: &RawEmployeeRow, idx: usize) -> String {
        self.cleaner.clean_text(row.cell(idx))
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_row(&self, row: &RawEmployeeRow, today: NaiveDate) -> ParsedEmployeeRow {
        let given = self.text(row, columns::GIVEN_NAMES);
        let surnames = self.text(row, columns::SURNAMES);
        let full_name = format!("{} {}", given, surnames).trim().to_string();

        ParsedEmployeeRow {
            row_number: row.row_number,
            document: self.text(row, columns::DOCUMENT),
            full_name,
            birth_date: self.cleaner.date_or(
                row.cell(columns::BIRTH_DATE),
                DataCleaner::default_birth_date(today),
            ),
            address: self.text(row, columns::ADDRESS),
            phone: self.text(row, columns::PHONE),
            email: self.text(row, columns::EMAIL),
            position_name: self.text(row, columns::POSITION),
            salary: self.cleaner.parse_salary(row.cell(columns::SALARY)),
            hire_date: self.cleaner.date_or(
                row.cell(columns::HIRE_DATE),
                DataCleaner::default_hire_date(today),
            ),
            status_name: self.text(row, columns::STATUS),
            education_name: self.text(row, columns::EDUCATION),
            professional_profile: self.text(row, columns::PROFESSIONAL_PROFILE),
            department_name: self.text(row, columns::DEPARTMENT),
        }
    }
}
