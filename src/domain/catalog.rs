// ==========================================
// TalentoPlus 人事管理系统 - 目录领域模型
// ==========================================
// 目录: 部门 / 职位 / 员工状态 / 学历
// 自然键: name（大小写不敏感仅由查找保证）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CatalogKind - 目录维度
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogKind {
    Department,
    Position,
    EmployeeStatus,
    EducationLevel,
}

impl CatalogKind {
    /// 全部维度（导入时按此顺序解析）
    pub const ALL: [CatalogKind; 4] = [
        CatalogKind::Department,
        CatalogKind::Position,
        CatalogKind::EmployeeStatus,
        CatalogKind::EducationLevel,
    ];

    /// 对应的数据表名
    pub fn table_name(&self) -> &'static str {
        match self {
            CatalogKind::Department => "departments",
            CatalogKind::Position => "positions",
            CatalogKind::EmployeeStatus => "employee_statuses",
            CatalogKind::EducationLevel => "education_levels",
        }
    }

    /// employees 表中的外键列名
    pub fn foreign_key_column(&self) -> &'static str {
        match self {
            CatalogKind::Department => "department_id",
            CatalogKind::Position => "position_id",
            CatalogKind::EmployeeStatus => "employee_status_id",
            CatalogKind::EducationLevel => "education_level_id",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CatalogKind::Department => "Department",
            CatalogKind::Position => "Position",
            CatalogKind::EmployeeStatus => "EmployeeStatus",
            CatalogKind::EducationLevel => "EducationLevel",
        };
        f.write_str(label)
    }
}

// ==========================================
// CatalogEntry - 目录条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub kind: CatalogKind,
    pub name: String,
}

/// 四个维度解析后的外键集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogRefs {
    pub department_id: i64,
    pub position_id: i64,
    pub employee_status_id: i64,
    pub education_level_id: i64,
}
