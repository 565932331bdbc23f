// ==========================================
// TalentoPlus 人事管理系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入/注册流程所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::catalog::CatalogKind;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ==========================================
// CatalogDefaults - 目录兜底名称
// ==========================================
// 导入行的目录名称为空时使用；注册流程的职位/状态/学历同样取自这里
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDefaults {
    pub department: String,
    pub position: String,
    pub status: String,
    pub education_level: String,
    /// 自助注册时的默认职位
    pub registration_position: String,
}

impl Default for CatalogDefaults {
    fn default() -> Self {
        Self {
            department: "Sin Departamento".to_string(),
            position: "Sin Cargo".to_string(),
            status: "Activo".to_string(),
            education_level: "Bachiller".to_string(),
            registration_position: "Auxiliar".to_string(),
        }
    }
}

impl CatalogDefaults {
    /// 导入场景下各维度的兜底名称
    pub fn fallback_for(&self, kind: CatalogKind) -> &str {
        match kind {
            CatalogKind::Department => &self.department,
            CatalogKind::Position => &self.position,
            CatalogKind::EmployeeStatus => &self.status,
            CatalogKind::EducationLevel => &self.education_level,
        }
    }

    /// 名称为空时取兜底值
    pub fn name_or_fallback<'a>(&'a self, kind: CatalogKind, name: &'a str) -> &'a str {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            self.fallback_for(kind)
        } else {
            trimmed
        }
    }
}

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）、CatalogDefaults（固定值，测试用）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取目录兜底名称
    ///
    /// # 默认值
    /// - Sin Departamento / Sin Cargo / Activo / Bachiller / Auxiliar
    async fn get_catalog_defaults(&self) -> RepositoryResult<CatalogDefaults>;
}

#[async_trait]
impl ImportConfigReader for CatalogDefaults {
    async fn get_catalog_defaults(&self) -> RepositoryResult<CatalogDefaults> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_uses_fallback() {
        let defaults = CatalogDefaults::default();
        assert_eq!(
            defaults.name_or_fallback(CatalogKind::Department, "   "),
            "Sin Departamento"
        );
        assert_eq!(defaults.name_or_fallback(CatalogKind::Position, ""), "Sin Cargo");
        assert_eq!(
            defaults.name_or_fallback(CatalogKind::EmployeeStatus, " Vacaciones "),
            "Vacaciones"
        );
        assert_eq!(defaults.fallback_for(CatalogKind::EducationLevel), "Bachiller");
    }
}
