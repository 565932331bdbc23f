// ==========================================
// TalentoPlus 人事管理系统 - 驾驶舱领域模型
// ==========================================

use serde::{Deserialize, Serialize};

/// 状态名称（与初始目录数据对齐）
pub const STATUS_ACTIVE: &str = "Activo";
pub const STATUS_INACTIVE: &str = "Inactivo";
pub const STATUS_VACATION: &str = "Vacaciones";

// ==========================================
// DashboardSummary - 驾驶舱汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_employees: i64,
    pub employees_on_vacation: i64,
    pub active_employees: i64,
    pub inactive_employees: i64,
}

// ==========================================
// QueryIntent - 自然语言问题分类结果
// ==========================================
// 线格式: CATEGORY|FILTER（与远程模型提示词约定一致）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryIntent {
    TotalEmployees,
    StatusCount(String),
    DepartmentCount(String),
    PositionCount(String),
    Unknown,
}

impl QueryIntent {
    /// 解析 `CATEGORY|FILTER` 文本
    ///
    /// 返回 None 表示文本不可识别（调用方据此回退到本地分类）
    pub fn parse(raw: &str) -> Option<Self> {
        let line = raw
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())?
            .trim_matches('`');

        let (category, filter) = match line.split_once('|') {
            Some((c, f)) => (c.trim(), f.trim().to_string()),
            None => (line.trim(), String::new()),
        };

        match category.to_uppercase().as_str() {
            "TOTAL_EMPLOYEES" => Some(QueryIntent::TotalEmployees),
            "STATUS_COUNT" if !filter.is_empty() => Some(QueryIntent::StatusCount(filter)),
            "DEPARTMENT_COUNT" if !filter.is_empty() => Some(QueryIntent::DepartmentCount(filter)),
            "POSITION_COUNT" if !filter.is_empty() => Some(QueryIntent::PositionCount(filter)),
            "UNKNOWN" => Some(QueryIntent::Unknown),
            _ => None,
        }
    }

    /// 渲染为 `CATEGORY|FILTER`
    pub fn to_wire(&self) -> String {
        match self {
            QueryIntent::TotalEmployees => "TOTAL_EMPLOYEES|".to_string(),
            QueryIntent::StatusCount(f) => format!("STATUS_COUNT|{}", f),
            QueryIntent::DepartmentCount(f) => format!("DEPARTMENT_COUNT|{}", f),
            QueryIntent::PositionCount(f) => format!("POSITION_COUNT|{}", f),
            QueryIntent::Unknown => "UNKNOWN|".to_string(),
        }
    }
}

// ==========================================
// AiAnswer - 问答结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnswer {
    pub question: String,
    pub answer: String,
    pub success: bool,
}
