// ==========================================
// EmployeeApi / RegistrationApi / CatalogApi 集成测试
// ==========================================
// 测试范围:
// 1. 管理员新建、更新、删除员工
// 2. 唯一性与外键校验
// 3. 自助注册的默认目录
// ==========================================


use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use talento_plus::api::{ApiError, CatalogApi};
use talento_plus::domain::{
    CatalogKind, CreateEmployeeRequest, EmployeeRegistrationRequest, UpdateEmployeeRequest,
};
use test_helpers::ApiTestEnv;

fn first_id(catalogs: &CatalogApi, kind: CatalogKind) -> i64 {
    catalogs.list(kind).expect("查询目录失败")[0].id
}

fn create_request(env: &ApiTestEnv, document: &str, email: &str) -> CreateEmployeeRequest {
    let catalogs = &env.state.catalog_api;
    CreateEmployeeRequest {
        full_name: "Ana Li".to_string(),
        document: document.to_string(),
        email: email.to_string(),
        phone: "3001234567".to_string(),
        address: "Calle 1".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        hire_date: NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
        salary: Decimal::from_str("2500000.50").unwrap(),
        professional_profile: "Backend".to_string(),
        password: "secreto".to_string(),
        department_id: first_id(catalogs, CatalogKind::Department),
        position_id: first_id(catalogs, CatalogKind::Position),
        employee_status_id: first_id(catalogs, CatalogKind::EmployeeStatus),
        education_level_id: first_id(catalogs, CatalogKind::EducationLevel),
    }
}

// ==========================================
// 新建
// ==========================================

#[test]
fn test_create_employee_returns_view_with_catalog_names() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.employee_api;

    let view = api
        .create_employee(create_request(&env, "111", "ana@x.com"))
        .expect("创建失败");

    assert_eq!(view.document, "111");
    assert_eq!(view.department_name, "Tecnología");
    assert_eq!(view.salary, Decimal::from_str("2500000.50").unwrap());

    let listed = api.list_employees().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(api.get_by_document("111").unwrap().unwrap().id, view.id);
    assert_eq!(api.get_employee(view.id).unwrap().unwrap().email, "ana@x.com");
}

#[test]
fn test_create_employee_rejects_duplicates() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.employee_api;
    api.create_employee(create_request(&env, "111", "ana@x.com")).unwrap();

    let dup_document = api.create_employee(create_request(&env, "111", "otra@x.com"));
    assert!(matches!(dup_document, Err(ApiError::BusinessRuleViolation(_))));

    let dup_email = api.create_employee(create_request(&env, "222", "ANA@x.com"));
    assert!(matches!(dup_email, Err(ApiError::BusinessRuleViolation(_))));
}

#[test]
fn test_create_employee_validates_input() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.employee_api;

    let mut request = create_request(&env, "111", "ana@x.com");
    request.salary = Decimal::from(-1);
    assert!(matches!(api.create_employee(request), Err(ApiError::InvalidInput(_))));

    let mut request = create_request(&env, "111", "ana@x.com");
    request.full_name = "   ".to_string();
    assert!(matches!(api.create_employee(request), Err(ApiError::InvalidInput(_))));

    let mut request = create_request(&env, "111", "ana@x.com");
    request.department_id = 9999;
    assert!(matches!(api.create_employee(request), Err(ApiError::InvalidInput(_))));

    assert!(api.list_employees().unwrap().is_empty());
}

// ==========================================
// 更新 / 删除
// ==========================================

#[test]
fn test_update_employee() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.employee_api;
    let created = api.create_employee(create_request(&env, "111", "ana@x.com")).unwrap();

    let vacation = env
        .state
        .catalog_api
        .list(CatalogKind::EmployeeStatus)
        .unwrap()
        .into_iter()
        .find(|s| s.name == "Vacaciones")
        .unwrap();
    let base = create_request(&env, "111", "ana@x.com");

    let updated = api
        .update_employee(
            created.id,
            UpdateEmployeeRequest {
                full_name: "Ana María Li".to_string(),
                phone: "3110000000".to_string(),
                address: String::new(),
                salary: Decimal::from(3_000_000),
                professional_profile: "Tech lead".to_string(),
                department_id: base.department_id,
                position_id: base.position_id,
                employee_status_id: vacation.id,
                education_level_id: base.education_level_id,
            },
        )
        .expect("更新失败");

    assert_eq!(updated.full_name, "Ana María Li");
    assert_eq!(updated.status_name, "Vacaciones");
    assert_eq!(updated.document, "111");
    assert!(api.verify_password("111", "secreto").unwrap());
}

#[test]
fn test_update_missing_employee_is_not_found() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let base = create_request(&env, "111", "ana@x.com");

    let result = env.state.employee_api.update_employee(
        404,
        UpdateEmployeeRequest {
            full_name: "X".to_string(),
            phone: String::new(),
            address: String::new(),
            salary: Decimal::ZERO,
            professional_profile: String::new(),
            department_id: base.department_id,
            position_id: base.position_id,
            employee_status_id: base.employee_status_id,
            education_level_id: base.education_level_id,
        },
    );
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_delete_employee() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.employee_api;
    let created = api.create_employee(create_request(&env, "111", "ana@x.com")).unwrap();

    api.delete_employee(created.id).expect("删除失败");
    assert!(api.get_employee(created.id).unwrap().is_none());
    assert!(matches!(api.delete_employee(created.id), Err(ApiError::NotFound(_))));
}

#[test]
fn test_verify_password_plain_equality() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.employee_api;
    api.create_employee(create_request(&env, "111", "ana@x.com")).unwrap();

    assert!(api.verify_password("111", "secreto").unwrap());
    assert!(!api.verify_password("111", "SECRETO").unwrap());
    assert!(!api.verify_password("999", "secreto").unwrap());
}

// ==========================================
// 自助注册
// ==========================================

#[tokio::test]
async fn test_register_uses_default_catalogs() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let department = env.state.catalog_api.list_departments().unwrap()[1].clone();

    let view = env
        .state
        .registration_api
        .register(EmployeeRegistrationRequest {
            full_name: "Luis Gómez".to_string(),
            document: "222".to_string(),
            email: "luis@x.com".to_string(),
            phone: String::new(),
            address: String::new(),
            birth_date: NaiveDate::from_ymd_opt(1995, 1, 10).unwrap(),
            password: "clave".to_string(),
            department_id: department.id,
        })
        .await
        .expect("注册失败");

    assert_eq!(view.department_name, department.name);
    assert_eq!(view.position_name, "Auxiliar");
    assert_eq!(view.status_name, "Activo");
    assert_eq!(view.education_level_name, "Bachiller");
    assert_eq!(view.salary, Decimal::ZERO);
    assert_eq!(view.professional_profile, "");
    assert!((view.hire_date - Local::now().date_naive()).num_days().abs() <= 1);
}

#[tokio::test]
async fn test_register_rejects_duplicate_document() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.state
        .employee_api
        .create_employee(create_request(&env, "111", "ana@x.com"))
        .unwrap();
    let department_id = env.state.catalog_api.list_departments().unwrap()[0].id;

    let result = env
        .state
        .registration_api
        .register(EmployeeRegistrationRequest {
            full_name: "Otra".to_string(),
            document: "111".to_string(),
            email: "otra@x.com".to_string(),
            phone: String::new(),
            address: String::new(),
            birth_date: NaiveDate::from_ymd_opt(1995, 1, 10).unwrap(),
            password: "clave".to_string(),
            department_id,
        })
        .await;

    assert!(matches!(result, Err(ApiError::BusinessRuleViolation(_))));
}

// ==========================================
// 目录
// ==========================================

#[test]
fn test_catalog_api_lookup() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let catalogs = &env.state.catalog_api;

    let departments = catalogs.list_departments().unwrap();
    assert!(departments.iter().any(|d| d.name == "Recursos Humanos"));

    let first = &departments[0];
    assert_eq!(catalogs.get_department(first.id).unwrap().as_ref(), Some(first));
    assert!(catalogs.get(CatalogKind::Position, 9999).unwrap().is_none());
}
