// ==========================================
// TalentoPlus 人事管理系统 - 目录查询 API
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::domain::catalog::{CatalogEntry, CatalogKind};
use crate::repository::CatalogStore;

pub struct CatalogApi {
    catalogs: Arc<dyn CatalogStore>,
}

impl CatalogApi {
    pub fn new(catalogs: Arc<dyn CatalogStore>) -> Self {
        Self { catalogs }
    }

    /// 按 id 升序列出某一维度
    pub fn list(&self, kind: CatalogKind) -> ApiResult<Vec<CatalogEntry>> {
        Ok(self.catalogs.list(kind)?)
    }

    pub fn get(&self, kind: CatalogKind, id: i64) -> ApiResult<Option<CatalogEntry>> {
        Ok(self.catalogs.find_by_id(kind, id)?)
    }

    /// 注册页使用的部门下拉
    pub fn list_departments(&self) -> ApiResult<Vec<CatalogEntry>> {
        self.list(CatalogKind::Department)
    }

    pub fn get_department(&self, id: i64) -> ApiResult<Option<CatalogEntry>> {
        self.get(CatalogKind::Department, id)
    }
}
