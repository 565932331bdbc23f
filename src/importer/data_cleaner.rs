// ==========================================
// TalentoPlus 人事管理系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 宽松日期解析 / 薪资解析
// 约束: 清洗永不拒绝行，失败一律静默降级
// ==========================================

use crate::importer::employee_importer_trait::DataCleaner as DataCleanerTrait;
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// 纯日期格式（日在前优先）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// 日期时间格式
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn parse_date_lenient(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.date_naive());
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    fn parse_salary(&self, value: &str) -> Decimal {
        let cleaned: String = value
            .chars()
            .filter(|c| *c != ',' && *c != '$' && !c.is_whitespace())
            .collect();

        match Decimal::from_str(&cleaned) {
            Ok(amount) if amount >= Decimal::ZERO => amount,
            _ => Decimal::ZERO,
        }
    }
}

impl DataCleaner {
    /// 出生日期兜底：今天往前 30 年
    pub fn default_birth_date(today: NaiveDate) -> NaiveDate {
        today.checked_sub_months(Months::new(30 * 12)).unwrap_or(today)
    }

    /// 入职日期兜底：今天
    pub fn default_hire_date(today: NaiveDate) -> NaiveDate {
        today
    }

    /// 解析日期，失败时使用兜底值
    pub fn date_or(&self, value: &str, fallback: NaiveDate) -> NaiveDate {
        self.parse_date_lenient(value).unwrap_or(fallback)
    }
}
