// ==========================================
// TalentoPlus 人事管理系统 - 员工管理 API
// ==========================================
// 职责: 员工查询、新建、更新、删除、口令比对
// 约束: 证件号/邮箱唯一；目录外键必须存在
// ==========================================

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::auth::password::plaintext_matches;
use crate::domain::catalog::{CatalogKind, CatalogRefs};
use crate::domain::employee::{CreateEmployeeRequest, EmployeeView, NewEmployee, UpdateEmployeeRequest};
use crate::repository::{CatalogStore, EmployeeStore};

// ==========================================
// EmployeeApi - 员工管理 API
// ==========================================
pub struct EmployeeApi {
    employees: Arc<dyn EmployeeStore>,
    catalogs: Arc<dyn CatalogStore>,
}

impl EmployeeApi {
    pub fn new(employees: Arc<dyn EmployeeStore>, catalogs: Arc<dyn CatalogStore>) -> Self {
        Self { employees, catalogs }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 员工列表（目录名称已关联）
    pub fn list_employees(&self) -> ApiResult<Vec<EmployeeView>> {
        Ok(self.employees.list_views()?)
    }

    pub fn get_employee(&self, id: i64) -> ApiResult<Option<EmployeeView>> {
        Ok(self.employees.find_view_by_id(id)?)
    }

    /// 按证件号查询
    pub fn get_by_document(&self, document: &str) -> ApiResult<Option<EmployeeView>> {
        let document = document.trim();
        if document.is_empty() {
            return Err(ApiError::InvalidInput("证件号不能为空".to_string()));
        }

        match self.employees.find_by_document(document)? {
            Some(employee) => Ok(self.employees.find_view_by_id(employee.id)?),
            None => Ok(None),
        }
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 管理员新建员工
    ///
    /// # 校验
    /// - 姓名/证件号/邮箱/口令必填
    /// - 薪资非负
    /// - 证件号、邮箱不得重复
    /// - 四个目录外键必须存在
    #[instrument(skip(self, request), fields(document = %request.document))]
    pub fn create_employee(&self, request: CreateEmployeeRequest) -> ApiResult<EmployeeView> {
        let document = request.document.trim().to_string();
        let email = request.email.trim().to_string();

        require_non_blank("fullName", &request.full_name)?;
        require_non_blank("document", &document)?;
        require_non_blank("email", &email)?;
        require_non_blank("password", &request.password)?;
        require_non_negative_salary(request.salary)?;

        if self.employees.exists_document(&document)? {
            warn!(document = %document, "证件号已存在");
            return Err(ApiError::BusinessRuleViolation(format!(
                "证件号已存在: {}",
                document
            )));
        }
        if self.employees.exists_email(&email)? {
            warn!(email = %email, "邮箱已存在");
            return Err(ApiError::BusinessRuleViolation(format!("邮箱已存在: {}", email)));
        }

        let refs = CatalogRefs {
            department_id: request.department_id,
            position_id: request.position_id,
            employee_status_id: request.employee_status_id,
            education_level_id: request.education_level_id,
        };
        self.ensure_refs_exist(&refs)?;

        let created = self.employees.create(&NewEmployee {
            full_name: request.full_name.trim().to_string(),
            document,
            email,
            phone: request.phone.trim().to_string(),
            address: request.address.trim().to_string(),
            birth_date: request.birth_date,
            hire_date: request.hire_date,
            salary: request.salary,
            professional_profile: request.professional_profile.trim().to_string(),
            password: request.password,
            refs,
        })?;

        info!(employee_id = created.id, "员工创建成功");
        self.view_of(created.id)
    }

    /// 更新员工（证件号、邮箱、口令保持不变）
    #[instrument(skip(self, request))]
    pub fn update_employee(&self, id: i64, request: UpdateEmployeeRequest) -> ApiResult<EmployeeView> {
        require_non_blank("fullName", &request.full_name)?;
        require_non_negative_salary(request.salary)?;

        let mut employee = self.employees.find_by_id(id)?.ok_or_else(|| {
            ApiError::NotFound(format!("Employee(id={})不存在", id))
        })?;

        let refs = CatalogRefs {
            department_id: request.department_id,
            position_id: request.position_id,
            employee_status_id: request.employee_status_id,
            education_level_id: request.education_level_id,
        };
        self.ensure_refs_exist(&refs)?;

        employee.full_name = request.full_name.trim().to_string();
        employee.phone = request.phone.trim().to_string();
        employee.address = request.address.trim().to_string();
        employee.salary = request.salary;
        employee.professional_profile = request.professional_profile.trim().to_string();
        employee.apply_catalog_refs(refs);

        self.employees.update(&employee)?;
        info!(employee_id = id, "员工更新成功");
        self.view_of(id)
    }

    /// 物理删除
    #[instrument(skip(self))]
    pub fn delete_employee(&self, id: i64) -> ApiResult<()> {
        self.employees.delete(id)?;
        info!(employee_id = id, "员工已删除");
        Ok(())
    }

    /// 员工口令比对（明文）
    pub fn verify_password(&self, document: &str, password: &str) -> ApiResult<bool> {
        Ok(self
            .employees
            .find_by_document(document.trim())?
            .map(|e| plaintext_matches(password, &e.password))
            .unwrap_or(false))
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn ensure_refs_exist(&self, refs: &CatalogRefs) -> ApiResult<()> {
        let checks = [
            (CatalogKind::Department, refs.department_id),
            (CatalogKind::Position, refs.position_id),
            (CatalogKind::EmployeeStatus, refs.employee_status_id),
            (CatalogKind::EducationLevel, refs.education_level_id),
        ];

        for (kind, id) in checks {
            if self.catalogs.find_by_id(kind, id)?.is_none() {
                return Err(ApiError::InvalidInput(format!("{}(id={})不存在", kind, id)));
            }
        }
        Ok(())
    }

    fn view_of(&self, id: i64) -> ApiResult<EmployeeView> {
        self.employees
            .find_view_by_id(id)?
            .ok_or_else(|| ApiError::InternalError(format!("写入后无法读取员工(id={})", id)))
    }
}

fn require_non_blank(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
    }
    Ok(())
}

fn require_non_negative_salary(salary: Decimal) -> ApiResult<()> {
    if salary < Decimal::ZERO {
        return Err(ApiError::InvalidInput(format!("薪资不能为负数: {}", salary)));
    }
    Ok(())
}
