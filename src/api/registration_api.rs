// ==========================================
// TalentoPlus 人事管理系统 - 员工自助注册 API
// ==========================================
// 职责: 公开注册入口；职位/状态/学历取配置中的默认名称
// 说明: 欢迎邮件不在本系统内发送，仅记录日志
// ==========================================

use std::sync::Arc;

use chrono::Local;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfigReader;
use crate::domain::catalog::{CatalogKind, CatalogRefs};
use crate::domain::employee::{EmployeeRegistrationRequest, EmployeeView, NewEmployee};
use crate::repository::{CatalogStore, EmployeeStore};

pub struct RegistrationApi {
    employees: Arc<dyn EmployeeStore>,
    catalogs: Arc<dyn CatalogStore>,
    config: Arc<dyn ImportConfigReader>,
}

impl RegistrationApi {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        catalogs: Arc<dyn CatalogStore>,
        config: Arc<dyn ImportConfigReader>,
    ) -> Self {
        Self {
            employees,
            catalogs,
            config,
        }
    }

    /// 员工自助注册
    ///
    /// # 规则
    /// - 证件号、邮箱不得重复
    /// - 入职日期 = 今天；薪资 = 0；职业简介为空
    /// - 部门由请求指定且必须存在
    #[instrument(skip(self, request), fields(document = %request.document))]
    pub async fn register(&self, request: EmployeeRegistrationRequest) -> ApiResult<EmployeeView> {
        let document = request.document.trim().to_string();
        let email = request.email.trim().to_string();

        for (field, value) in [
            ("fullName", request.full_name.as_str()),
            ("document", document.as_str()),
            ("email", email.as_str()),
            ("password", request.password.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
            }
        }

        if self.employees.exists_document(&document)? {
            warn!(document = %document, "注册失败: 证件号已存在");
            return Err(ApiError::BusinessRuleViolation(format!(
                "证件号已存在: {}",
                document
            )));
        }
        if self.employees.exists_email(&email)? {
            warn!(email = %email, "注册失败: 邮箱已存在");
            return Err(ApiError::BusinessRuleViolation(format!("邮箱已存在: {}", email)));
        }

        if self
            .catalogs
            .find_by_id(CatalogKind::Department, request.department_id)?
            .is_none()
        {
            return Err(ApiError::InvalidInput(format!(
                "{}(id={})不存在",
                CatalogKind::Department,
                request.department_id
            )));
        }

        let defaults = self.config.get_catalog_defaults().await?;
        let refs = CatalogRefs {
            department_id: request.department_id,
            position_id: self
                .catalogs
                .resolve_or_register(CatalogKind::Position, &defaults.registration_position)?
                .id,
            employee_status_id: self
                .catalogs
                .resolve_or_register(CatalogKind::EmployeeStatus, &defaults.status)?
                .id,
            education_level_id: self
                .catalogs
                .resolve_or_register(CatalogKind::EducationLevel, &defaults.education_level)?
                .id,
        };

        let created = self.employees.create(&NewEmployee {
            full_name: request.full_name.trim().to_string(),
            document,
            email,
            phone: request.phone.trim().to_string(),
            address: request.address.trim().to_string(),
            birth_date: request.birth_date,
            hire_date: Local::now().date_naive(),
            salary: Decimal::ZERO,
            professional_profile: String::new(),
            password: request.password,
            refs,
        })?;

        info!(
            employee_id = created.id,
            email = %created.email,
            "员工注册成功，欢迎邮件未发送（无邮件通道）"
        );

        self.employees
            .find_view_by_id(created.id)?
            .ok_or_else(|| ApiError::InternalError(format!("写入后无法读取员工(id={})", created.id)))
    }
}
