// ==========================================
// TalentoPlus 人事管理系统 - 员工导入 API
// ==========================================
// 职责: 封装员工导入（字节流 / 文件路径）
// 说明: 行级错误在 ImportSummary.errors 中返回，不作为 Err
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::import::{ImportSummary, SourceFormat};
use crate::importer::{EmployeeImporter, EmployeeImporterImpl};
use crate::repository::{CatalogStore, EmployeeStore};

pub struct ImportApi {
    importer: EmployeeImporterImpl<ConfigManager>,
}

impl ImportApi {
    /// 创建导入 API（导入器的目录兜底名称从 config_kv 读取）
    pub fn new(
        conn: Arc<Mutex<Connection>>,
        employees: Arc<dyn EmployeeStore>,
        catalogs: Arc<dyn CatalogStore>,
    ) -> ApiResult<Self> {
        let config = ConfigManager::from_connection(conn)?;
        Ok(Self {
            importer: EmployeeImporterImpl::new(employees, catalogs, config),
        })
    }

    /// 导入上传的字节流
    pub async fn import_bytes(&self, bytes: &[u8], format: SourceFormat) -> ApiResult<ImportSummary> {
        if bytes.is_empty() {
            return Err(ApiError::InvalidInput("上传文件为空".to_string()));
        }

        let summary = self.importer.import_from_bytes(bytes, format).await?;
        log_summary(&summary);
        Ok(summary)
    }

    /// 导入本地文件（格式由扩展名判断）
    pub async fn import_file(&self, file_path: &str) -> ApiResult<ImportSummary> {
        let summary = self.importer.import_from_file(Path::new(file_path)).await?;
        log_summary(&summary);
        Ok(summary)
    }
}

fn log_summary(summary: &ImportSummary) {
    if summary.success {
        info!(
            imported = summary.imported_rows,
            updated = summary.updated_rows,
            errors = summary.error_rows,
            "导入 API 调用完成"
        );
    } else {
        warn!(errors = summary.error_rows, "导入未写入任何行");
    }
}
