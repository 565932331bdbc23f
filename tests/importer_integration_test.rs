// ==========================================
// EmployeeImporter 集成测试
// ==========================================
// 测试目标: 验证完整的员工导入与目录对账流程
// ==========================================


use std::sync::Arc;

use chrono::{Local, Months, NaiveDate};
use rust_decimal::Decimal;
use talento_plus::config::{config_keys, ConfigManager};
use talento_plus::domain::{CatalogKind, SourceFormat};
use talento_plus::importer::{EmployeeImporter, EmployeeImporterImpl, ImportError};
use talento_plus::logging;
use talento_plus::repository::{CatalogRepository, CatalogStore, EmployeeRepository, EmployeeStore};
use test_helpers::{
    build_xlsx, create_test_db, employee_csv, employee_xlsx, open_shared, text_cells,
    write_csv_file, write_xlsx_file, EmployeeRowBuilder, XlsxCell,
};

struct ImportTestEnv {
    importer: EmployeeImporterImpl<ConfigManager>,
    employees: Arc<EmployeeRepository>,
    catalogs: Arc<CatalogRepository>,
    config: ConfigManager,
    _temp_file: tempfile::NamedTempFile,
}

/// 创建测试用的导入器实例
fn create_test_env() -> ImportTestEnv {
    logging::init_test();
    talento_plus::i18n::set_locale("es");

    let (temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared(&db_path).expect("Failed to open db");

    let employees = Arc::new(EmployeeRepository::from_connection(conn.clone()));
    let catalogs = Arc::new(CatalogRepository::from_connection(conn.clone()));
    let config = ConfigManager::from_connection(conn.clone()).expect("Failed to create ConfigManager");
    let importer_config =
        ConfigManager::from_connection(conn).expect("Failed to create ConfigManager");

    ImportTestEnv {
        importer: EmployeeImporterImpl::new(employees.clone(), catalogs.clone(), importer_config),
        employees,
        catalogs,
        config,
        _temp_file: temp_file,
    }
}

impl ImportTestEnv {
    fn catalog_name(&self, kind: CatalogKind, id: i64) -> String {
        self.catalogs.find_by_id(kind, id).unwrap().unwrap().name
    }
}

#[tokio::test]
async fn test_end_to_end_one_valid_one_blank_document() {
    let env = create_test_env();
    let csv = employee_csv(&[
        EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com")
            .department("Tecnología")
            .build(),
        EmployeeRowBuilder::new("", "Luis", "Gómez", "luis@x.com").build(),
    ]);

    let summary = env
        .importer
        .import_from_bytes(&csv, SourceFormat::Csv)
        .await
        .expect("导入失败");

    assert!(summary.success);
    assert_eq!(summary.total_rows, 2);
    assert_eq!(summary.imported_rows, 1);
    assert_eq!(summary.updated_rows, 0);
    assert_eq!(summary.error_rows, 1);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains('3'), "错误应引用第 3 行: {}", summary.errors[0]);

    let stored = env.employees.find_by_document("111").unwrap().unwrap();
    assert_eq!(stored.full_name, "Ana Li");
    assert_eq!(stored.email, "ana@x.com");
    assert_eq!(stored.password, "111");

    let dept = env
        .catalogs
        .find_by_id(CatalogKind::Department, stored.department_id)
        .unwrap()
        .unwrap();
    assert_eq!(dept.name, "Tecnología");
}

#[tokio::test]
async fn test_reimport_updates_existing_employee() {
    let env = create_test_env();

    let first = employee_csv(&[EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com")
        .birth_date("17/05/1990")
        .address("Calle 1")
        .phone("3001111111")
        .position("Analista")
        .salary("1000")
        .hire_date("01/02/2021")
        .status("Activo")
        .education("Técnico")
        .profile("Backend")
        .department("Tecnología")
        .build()]);
    let summary = env.importer.import_from_bytes(&first, SourceFormat::Csv).await.unwrap();
    assert_eq!(summary.imported_rows, 1);
    assert_eq!(summary.updated_rows, 0);

    let second = employee_csv(&[EmployeeRowBuilder::new("111", "Ana María", "Li", "ana.maria@x.com")
        .birth_date("18/06/1991")
        .address("Carrera 9 #10-20")
        .phone("3112222222")
        .position("Gerente")
        .salary("2000")
        .hire_date("15/03/2022")
        .status("Vacaciones")
        .education("Profesional")
        .profile("Tech lead")
        .department("Finanzas")
        .build()]);
    let summary = env.importer.import_from_bytes(&second, SourceFormat::Csv).await.unwrap();
    assert_eq!(summary.imported_rows, 0);
    assert_eq!(summary.updated_rows, 1);
    assert!(summary.success);

    // 所有字段取第二次导入的值
    let stored = env.employees.find_by_document("111").unwrap().unwrap();
    assert_eq!(stored.full_name, "Ana María Li");
    assert_eq!(stored.email, "ana.maria@x.com");
    assert_eq!(stored.address, "Carrera 9 #10-20");
    assert_eq!(stored.phone, "3112222222");
    assert_eq!(stored.birth_date, NaiveDate::from_ymd_opt(1991, 6, 18).unwrap());
    assert_eq!(stored.hire_date, NaiveDate::from_ymd_opt(2022, 3, 15).unwrap());
    assert_eq!(stored.salary, Decimal::from(2000));
    assert_eq!(stored.professional_profile, "Tech lead");
    assert_eq!(env.catalog_name(CatalogKind::Department, stored.department_id), "Finanzas");
    assert_eq!(env.catalog_name(CatalogKind::Position, stored.position_id), "Gerente");
    assert_eq!(
        env.catalog_name(CatalogKind::EmployeeStatus, stored.employee_status_id),
        "Vacaciones"
    );
    assert_eq!(
        env.catalog_name(CatalogKind::EducationLevel, stored.education_level_id),
        "Profesional"
    );
    assert!(stored.updated_at.is_some());
    // 口令不随更新改变
    assert_eq!(stored.password, "111");
    assert_eq!(env.employees.count_all().unwrap(), 1);
}

#[tokio::test]
async fn test_csv_blank_line_keeps_physical_row_numbers() {
    let env = create_test_env();
    let valid = employee_csv(&[EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com").build()]);
    let invalid = employee_csv(&[EmployeeRowBuilder::new("", "Luis", "Gómez", "luis@x.com").build()]);

    // 表头 / 第 2 行有效 / 第 3 行空行 / 第 4 行缺少证件号
    let mut csv = valid;
    csv.extend_from_slice(b"\n");
    let header_len = invalid.iter().position(|&b| b == b'\n').unwrap() + 1;
    csv.extend_from_slice(&invalid[header_len..]);

    let summary = env.importer.import_from_bytes(&csv, SourceFormat::Csv).await.unwrap();
    assert!(summary.success);
    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.imported_rows, 1);
    assert_eq!(summary.error_rows, 2);
    assert!(summary.errors[0].starts_with("Fila 3:"), "{}", summary.errors[0]);
    assert!(summary.errors[1].starts_with("Fila 4:"), "{}", summary.errors[1]);
    assert!(env.employees.find_by_document("111").unwrap().is_some());
}

#[tokio::test]
async fn test_unknown_catalog_name_is_created_once_and_reused_any_casing() {
    let env = create_test_env();
    let before = env.catalogs.list(CatalogKind::Department).unwrap().len();

    let csv = employee_csv(&[
        EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com")
            .department("Logística")
            .build(),
        EmployeeRowBuilder::new("222", "Luis", "Gómez", "luis@x.com")
            .department("LOGÍSTICA")
            .build(),
    ]);
    let summary = env.importer.import_from_bytes(&csv, SourceFormat::Csv).await.unwrap();
    assert_eq!(summary.imported_rows, 2);

    let departments = env.catalogs.list(CatalogKind::Department).unwrap();
    assert_eq!(departments.len(), before + 1);
    let created: Vec<_> = departments.iter().filter(|d| d.name == "Logística").collect();
    assert_eq!(created.len(), 1);

    let ana = env.employees.find_by_document("111").unwrap().unwrap();
    let luis = env.employees.find_by_document("222").unwrap().unwrap();
    assert_eq!(ana.department_id, created[0].id);
    assert_eq!(luis.department_id, created[0].id);

    // 再次导入（小写）仍复用
    let csv = employee_csv(&[EmployeeRowBuilder::new("333", "Eva", "Ruiz", "eva@x.com")
        .department("logística")
        .build()]);
    env.importer.import_from_bytes(&csv, SourceFormat::Csv).await.unwrap();
    assert_eq!(env.catalogs.list(CatalogKind::Department).unwrap().len(), before + 1);
}

#[tokio::test]
async fn test_bad_date_and_salary_degrade_silently() {
    let env = create_test_env();
    let csv = employee_csv(&[EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com")
        .birth_date("not-a-date")
        .hire_date("??")
        .salary("abc")
        .build()]);

    let summary = env.importer.import_from_bytes(&csv, SourceFormat::Csv).await.unwrap();
    assert_eq!(summary.imported_rows, 1);
    assert_eq!(summary.error_rows, 0);

    let stored = env.employees.find_by_document("111").unwrap().unwrap();
    let today = Local::now().date_naive();
    let expected_birth = today.checked_sub_months(Months::new(360)).unwrap();
    let diff = (stored.birth_date - expected_birth).num_days().abs();
    assert!(diff <= 1, "birth_date={} expected≈{}", stored.birth_date, expected_birth);
    assert!((stored.hire_date - today).num_days().abs() <= 1);
    assert_eq!(stored.salary, Decimal::ZERO);
}

#[tokio::test]
async fn test_one_valid_two_invalid_is_partial_success() {
    let env = create_test_env();
    let csv = employee_csv(&[
        EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com").build(),
        EmployeeRowBuilder::new("222", "", "", "luis@x.com").build(),
        EmployeeRowBuilder::new("333", "Eva", "Ruiz", "").build(),
    ]);

    let summary = env.importer.import_from_bytes(&csv, SourceFormat::Csv).await.unwrap();
    assert!(summary.success);
    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.imported_rows, 1);
    assert_eq!(summary.error_rows, 2);
    assert!(summary.errors[0].contains('3'));
    assert!(summary.errors[1].contains('4'));
}

#[tokio::test]
async fn test_only_invalid_rows_is_failure() {
    let env = create_test_env();
    let csv = employee_csv(&[
        EmployeeRowBuilder::new("", "Ana", "Li", "ana@x.com").build(),
        EmployeeRowBuilder::new("222", "Luis", "Gómez", "").build(),
    ]);

    let summary = env.importer.import_from_bytes(&csv, SourceFormat::Csv).await.unwrap();
    assert!(!summary.success);
    assert_eq!(summary.imported_rows, 0);
    assert_eq!(summary.updated_rows, 0);
    assert_eq!(summary.error_rows, 2);
    assert_eq!(env.employees.count_all().unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_email_becomes_row_error() {
    let env = create_test_env();
    let csv = employee_csv(&[
        EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com").build(),
        EmployeeRowBuilder::new("222", "Luis", "Gómez", "Ana@X.com").build(),
    ]);

    let summary = env.importer.import_from_bytes(&csv, SourceFormat::Csv).await.unwrap();
    assert!(summary.success);
    assert_eq!(summary.imported_rows, 1);
    assert_eq!(summary.error_rows, 1);
    assert!(summary.errors[0].contains('3'));
    assert!(env.employees.find_by_document("222").unwrap().is_none());
}

#[tokio::test]
async fn test_blank_catalog_uses_configured_fallback() {
    let env = create_test_env();
    env.config
        .set_global_config_value(config_keys::DEFAULT_DEPARTMENT, "General")
        .unwrap();

    let csv = employee_csv(&[EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com").build()]);
    env.importer.import_from_bytes(&csv, SourceFormat::Csv).await.unwrap();

    let stored = env.employees.find_by_document("111").unwrap().unwrap();
    let dept = env
        .catalogs
        .find_by_id(CatalogKind::Department, stored.department_id)
        .unwrap()
        .unwrap();
    assert_eq!(dept.name, "General");

    let status = env
        .catalogs
        .find_by_id(CatalogKind::EmployeeStatus, stored.employee_status_id)
        .unwrap()
        .unwrap();
    assert_eq!(status.name, "Activo");
}

#[tokio::test]
async fn test_header_only_sheet_is_empty_success() {
    let env = create_test_env();
    let csv = employee_csv(&[]);

    let summary = env.importer.import_from_bytes(&csv, SourceFormat::Csv).await.unwrap();
    assert!(summary.success);
    assert_eq!(summary.total_rows, 0);
    assert!(summary.errors.is_empty());
}

#[tokio::test]
async fn test_import_from_file() {
    let env = create_test_env();
    let file = write_csv_file(&[EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com")
        .status("Vacaciones")
        .build()])
    .unwrap();

    let summary = env.importer.import_from_file(file.path()).await.unwrap();
    assert_eq!(summary.imported_rows, 1);
    assert_eq!(
        env.employees
            .count_by_catalog_name(CatalogKind::EmployeeStatus, "vacaciones")
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_corrupt_workbook_is_operation_error() {
    let env = create_test_env();
    let result = env
        .importer
        .import_from_bytes(b"not a workbook at all", SourceFormat::Xlsx)
        .await;

    assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    assert_eq!(env.employees.count_all().unwrap(), 0);
}

// ==========================================
// Excel 工作簿
// ==========================================

#[tokio::test]
async fn test_xlsx_end_to_end_with_typed_cells() {
    let env = create_test_env();

    // 第 2 行: 数字证件号 / 日期单元格 / 数字薪资
    let typed_row = vec![
        XlsxCell::Number(1012345678.0),
        XlsxCell::text("Ana"),
        XlsxCell::text("Li"),
        XlsxCell::Date(33010.0), // 1990-05-17
        XlsxCell::text("Calle 1"),
        XlsxCell::Number(3001234567.0),
        XlsxCell::text("ana@x.com"),
        XlsxCell::text("Analista"),
        XlsxCell::Number(2500000.0),
        XlsxCell::text("01/02/2021"),
        XlsxCell::text("Activo"),
        XlsxCell::text("Profesional"),
        XlsxCell::text("Backend"),
        XlsxCell::text("Finanzas"),
    ];
    let rows = vec![
        typed_row,
        // 第 3 行: 缺少证件号
        text_cells(&EmployeeRowBuilder::new("", "Luis", "Gómez", "luis@x.com").build()),
        // 第 4 行: 整行空白
        Vec::new(),
        // 第 5 行: 文本日期 dd/mm/yyyy
        text_cells(
            &EmployeeRowBuilder::new("222", "Eva", "Ruiz", "eva@x.com")
                .birth_date("17/05/1990")
                .build(),
        ),
    ];
    let bytes = employee_xlsx(&rows).unwrap();

    let summary = env.importer.import_from_bytes(&bytes, SourceFormat::Xlsx).await.unwrap();
    assert!(summary.success);
    assert_eq!(summary.total_rows, 4);
    assert_eq!(summary.imported_rows, 2);
    assert_eq!(summary.error_rows, 2);
    assert!(summary.errors[0].starts_with("Fila 3:"), "{}", summary.errors[0]);
    assert!(summary.errors[1].starts_with("Fila 4:"), "{}", summary.errors[1]);

    let ana = env.employees.find_by_document("1012345678").unwrap().unwrap();
    assert_eq!(ana.full_name, "Ana Li");
    assert_eq!(ana.birth_date, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
    assert_eq!(ana.hire_date, NaiveDate::from_ymd_opt(2021, 2, 1).unwrap());
    assert_eq!(ana.phone, "3001234567");
    assert_eq!(ana.salary, Decimal::from(2_500_000));
    assert_eq!(ana.password, "1012345678");
    assert_eq!(env.catalog_name(CatalogKind::Department, ana.department_id), "Finanzas");

    let eva = env.employees.find_by_document("222").unwrap().unwrap();
    assert_eq!(eva.birth_date, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
}

#[tokio::test]
async fn test_xlsx_import_from_file() {
    let env = create_test_env();
    let file = write_xlsx_file(&[text_cells(
        &EmployeeRowBuilder::new("111", "Ana", "Li", "ana@x.com")
            .status("Vacaciones")
            .build(),
    )])
    .unwrap();

    let summary = env.importer.import_from_file(file.path()).await.unwrap();
    assert!(summary.success);
    assert_eq!(summary.total_rows, 1);
    assert_eq!(summary.imported_rows, 1);
}

#[tokio::test]
async fn test_workbook_without_worksheet_is_failed_summary() {
    let env = create_test_env();
    let bytes = build_xlsx(None).unwrap();

    let summary = env.importer.import_from_bytes(&bytes, SourceFormat::Xlsx).await.unwrap();
    assert!(!summary.success);
    assert_eq!(summary.total_rows, 0);
    assert_eq!(summary.imported_rows, 0);
    assert_eq!(summary.errors, vec![talento_plus::i18n::t("import.no_worksheet")]);
    assert_eq!(env.employees.count_all().unwrap(), 0);
}
