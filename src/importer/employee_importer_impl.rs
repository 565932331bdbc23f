// ==========================================
// TalentoPlus 人事管理系统 - 员工导入器实现（对账引擎）
// ==========================================
// 职责: 整合导入流程，从字节/文件到数据库
// 流程: 解析 → 映射(含清洗) → 必填校验 → 目录对账 → 按证件号增改 → 汇总
// 约束: 逐行顺序处理；单行失败不影响其他行，不做跨行事务
// ==========================================

use crate::config::{CatalogDefaults, ImportConfigReader};
use crate::domain::catalog::{CatalogKind, CatalogRefs};
use crate::domain::employee::NewEmployee;
use crate::domain::import::{ImportSummary, ParsedEmployeeRow, RawEmployeeRow, SourceFormat};
use crate::i18n::{t, t_with_args};
use crate::importer::employee_importer_trait::{EmployeeImporter, FieldMapper, SheetRows};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as DefaultFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::result_aggregator::{ImportTally, RowOutcome};
use crate::repository::{CatalogStore, EmployeeStore, RepositoryResult};
use chrono::{Local, NaiveDate};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// EmployeeImporterImpl - 员工导入器实现
// ==========================================
pub struct EmployeeImporterImpl<C>
where
    C: ImportConfigReader,
{
    // 数据访问层
    employees: Arc<dyn EmployeeStore>,
    catalogs: Arc<dyn CatalogStore>,

    // 配置读取器
    config: C,

    // 导入组件
    field_mapper: Box<dyn FieldMapper>,
}

impl<C> EmployeeImporterImpl<C>
where
    C: ImportConfigReader,
{
    /// 创建导入器（使用默认字段映射器）
    pub fn new(employees: Arc<dyn EmployeeStore>, catalogs: Arc<dyn CatalogStore>, config: C) -> Self {
        Self::with_field_mapper(employees, catalogs, config, Box::new(DefaultFieldMapper::new()))
    }

    pub fn with_field_mapper(
        employees: Arc<dyn EmployeeStore>,
        catalogs: Arc<dyn CatalogStore>,
        config: C,
        field_mapper: Box<dyn FieldMapper>,
    ) -> Self {
        Self {
            employees,
            catalogs,
            config,
            field_mapper,
        }
    }

    /// 处理已解析的行（表头之后的所有物理行）
    ///
    /// today 决定日期兜底值
    pub async fn import_rows(
        &self,
        rows: &[RawEmployeeRow],
        today: NaiveDate,
    ) -> ImportResult<ImportSummary> {
        let defaults = self.config.get_catalog_defaults().await?;

        let mut tally = ImportTally::new(rows.len());
        for raw in rows {
            let outcome = self.process_row(raw, &defaults, today);
            debug!(row = raw.row_number, outcome = ?outcome, "行处理完成");
            tally.record(outcome);
        }

        Ok(tally.finalize())
    }

    /// 单行处理：任何错误都转为 RowOutcome::Failed
    fn process_row(&self, raw: &RawEmployeeRow, defaults: &CatalogDefaults, today: NaiveDate) -> RowOutcome {
        let parsed = self.field_mapper.map_row(raw, today);
        let row_label = parsed.row_number.to_string();

        if !parsed.has_required_fields() {
            warn!(row = parsed.row_number, "缺少必填字段（姓名/证件号/邮箱）");
            return RowOutcome::Failed(t_with_args(
                "import.row_missing_required",
                &[("row", &row_label)],
            ));
        }

        match self.upsert_row(&parsed, defaults) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(row = parsed.row_number, document = %parsed.document, error = %e, "行写入失败");
                RowOutcome::Failed(t_with_args(
                    "import.row_failed",
                    &[("row", &row_label), ("error", &e.to_string())],
                ))
            }
        }
    }

    /// 解析四个目录维度（空名称取兜底值，不存在则自动创建）
    fn resolve_refs(&self, parsed: &ParsedEmployeeRow, defaults: &CatalogDefaults) -> RepositoryResult<CatalogRefs> {
        let resolve = |kind: CatalogKind, name: &str| -> RepositoryResult<i64> {
            let name = defaults.name_or_fallback(kind, name);
            Ok(self.catalogs.resolve_or_register(kind, name)?.id)
        };

        Ok(CatalogRefs {
            department_id: resolve(CatalogKind::Department, &parsed.department_name)?,
            position_id: resolve(CatalogKind::Position, &parsed.position_name)?,
            employee_status_id: resolve(CatalogKind::EmployeeStatus, &parsed.status_name)?,
            education_level_id: resolve(CatalogKind::EducationLevel, &parsed.education_name)?,
        })
    }

    /// 按证件号决定新增或更新
    fn upsert_row(&self, parsed: &ParsedEmployeeRow, defaults: &CatalogDefaults) -> RepositoryResult<RowOutcome> {
        let refs = self.resolve_refs(parsed, defaults)?;

        match self.employees.find_by_document(&parsed.document)? {
            Some(mut existing) => {
                existing.full_name = parsed.full_name.clone();
                existing.email = parsed.email.clone();
                existing.phone = parsed.phone.clone();
                existing.address = parsed.address.clone();
                existing.birth_date = parsed.birth_date;
                existing.hire_date = parsed.hire_date;
                existing.salary = parsed.salary;
                existing.professional_profile = parsed.professional_profile.clone();
                existing.apply_catalog_refs(refs);

                self.employees.update(&existing)?;
                Ok(RowOutcome::Updated)
            }
            None => {
                let new_employee = NewEmployee {
                    full_name: parsed.full_name.clone(),
                    document: parsed.document.clone(),
                    email: parsed.email.clone(),
                    phone: parsed.phone.clone(),
                    address: parsed.address.clone(),
                    birth_date: parsed.birth_date,
                    hire_date: parsed.hire_date,
                    salary: parsed.salary,
                    professional_profile: parsed.professional_profile.clone(),
                    // 初始口令 = 证件号
                    password: parsed.document.clone(),
                    refs,
                };

                self.employees.create(&new_employee)?;
                Ok(RowOutcome::Inserted)
            }
        }
    }
}

#[async_trait::async_trait]
impl<C> EmployeeImporter for EmployeeImporterImpl<C>
where
    C: ImportConfigReader + Send + Sync,
{
    #[instrument(skip(self, bytes), fields(run_id = tracing::field::Empty, size = bytes.len()))]
    async fn import_from_bytes(
        &self,
        bytes: &[u8],
        format: SourceFormat,
    ) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());
        info!(run_id = %run_id, format = ?format, "开始导入员工数据");

        // === 步骤 1: 解析文件 ===
        let sheet = UniversalFileParser::parser_for(format)
            .parse_bytes(bytes)
            .map_err(|e| {
                error!(error = %e, "文件解析失败");
                e
            })?;

        let rows = match sheet {
            SheetRows::NoWorksheet => {
                warn!(run_id = %run_id, "工作簿中没有工作表");
                return Ok(ImportSummary::failed(t("import.no_worksheet")));
            }
            SheetRows::Rows(rows) => rows,
        };
        info!(total_rows = rows.len(), "文件解析完成");

        // === 步骤 2: 逐行对账 ===
        let today = Local::now().date_naive();
        let summary = self.import_rows(&rows, today).await?;

        info!(
            run_id = %run_id,
            total_rows = summary.total_rows,
            imported_rows = summary.imported_rows,
            updated_rows = summary.updated_rows,
            error_rows = summary.error_rows,
            success = summary.success,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "员工数据导入完成"
        );

        Ok(summary)
    }

    #[instrument(skip(self, file_path), fields(file_path = %file_path.display()))]
    async fn import_from_file(&self, file_path: &Path) -> ImportResult<ImportSummary> {
        let (bytes, format) = UniversalFileParser::read_source(file_path).map_err(|e| {
            error!(error = %e, "文件读取失败");
            e
        })?;
        self.import_from_bytes(&bytes, format).await
    }
}
