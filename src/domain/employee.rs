// ==========================================
// TalentoPlus 人事管理系统 - 员工领域模型
// ==========================================
// 主键: id（代理键，分配后不可变）
// 自然键: document（唯一）/ email（唯一，大小写不敏感）
// ==========================================

use crate::domain::catalog::CatalogRefs;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// Employee - 员工主数据
// ==========================================
// 用途: 仓储层读写的持久化实体
// 对齐: employees 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    // ===== 主键 =====
    pub id: i64,

    // ===== 基础信息 =====
    pub full_name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    pub professional_profile: String,

    // 明文口令，仅用于登录比对（见 DESIGN.md）
    #[serde(skip_serializing)]
    pub password: String,

    // ===== 目录外键 =====
    pub department_id: i64,
    pub position_id: i64,
    pub employee_status_id: i64,
    pub education_level_id: i64,

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// 用目录解析结果覆盖四个外键
    pub fn apply_catalog_refs(&mut self, refs: CatalogRefs) {
        self.department_id = refs.department_id;
        self.position_id = refs.position_id;
        self.employee_status_id = refs.employee_status_id;
        self.education_level_id = refs.education_level_id;
    }
}

// ==========================================
// NewEmployee - 待插入员工
// ==========================================
// id / created_at 由仓储在插入时分配
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub full_name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    pub professional_profile: String,
    pub password: String,
    pub refs: CatalogRefs,
}

// ==========================================
// EmployeeView - 对外展示 DTO
// ==========================================
// 目录外键替换为目录名称
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub id: i64,
    pub full_name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    pub professional_profile: String,
    pub department_name: String,
    pub position_name: String,
    pub status_name: String,
    pub education_level_name: String,
}

// ==========================================
// 管理端请求 DTO
// ==========================================

/// 管理员新建员工
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub full_name: String,
    pub document: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    #[serde(default)]
    pub professional_profile: String,
    pub password: String,
    pub department_id: i64,
    pub position_id: i64,
    pub employee_status_id: i64,
    pub education_level_id: i64,
}

/// 管理员更新员工（证件号/邮箱/口令不在此处修改）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub salary: Decimal,
    #[serde(default)]
    pub professional_profile: String,
    pub department_id: i64,
    pub position_id: i64,
    pub employee_status_id: i64,
    pub education_level_id: i64,
}

/// 员工自助注册
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRegistrationRequest {
    pub full_name: String,
    pub document: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub birth_date: NaiveDate,
    pub password: String,
    pub department_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_password_is_never_serialized() {
        let employee = Employee {
            id: 1,
            full_name: "Ana Li".to_string(),
            document: "111".to_string(),
            email: "ana@x.com".to_string(),
            phone: String::new(),
            address: String::new(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            salary: Decimal::from_str("1500.50").unwrap(),
            professional_profile: String::new(),
            password: "secreto".to_string(),
            department_id: 1,
            position_id: 1,
            employee_status_id: 1,
            education_level_id: 1,
            created_at: Utc::now(),
            updated_at: None,
        };

        let json = serde_json::to_string(&employee).unwrap();
        assert!(!json.contains("secreto"));
        assert!(json.contains("1500.50"));
    }
}
