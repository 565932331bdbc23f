// ==========================================
// TalentoPlus 人事管理系统 - 认证 API
// ==========================================
// 职责: 管理员登录 / 员工登录 / 令牌校验 / 管理员种子账号
// 约束: 管理员口令为 argon2 哈希；员工口令为明文比对
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::auth::password::{hash_password, plaintext_matches, verify_password};
use crate::auth::{AuthError, Claims, JwtService, ROLE_ADMIN, ROLE_EMPLOYEE};
use crate::repository::{AdminUserRepository, EmployeeStore};

/// 默认管理员账号
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@talentoplus.com";
pub const DEFAULT_ADMIN_NAME: &str = "Administrador";

// ==========================================
// 请求 / 响应 DTO
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// 员工登录：证件号 + 邮箱，口令可选
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeLoginRequest {
    pub document: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub employee_id: Option<i64>,
}

// ==========================================
// AuthApi
// ==========================================
pub struct AuthApi {
    admins: Arc<AdminUserRepository>,
    employees: Arc<dyn EmployeeStore>,
    jwt: JwtService,
}

impl AuthApi {
    pub fn new(
        admins: Arc<AdminUserRepository>,
        employees: Arc<dyn EmployeeStore>,
        jwt: JwtService,
    ) -> Self {
        Self {
            admins,
            employees,
            jwt,
        }
    }

    /// 管理员登录
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub fn admin_login(&self, request: AdminLoginRequest) -> ApiResult<LoginResponse> {
        let admin = self
            .admins
            .find_by_email(&request.email)?
            .filter(|a| a.is_admin)
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &admin.password_hash) {
            warn!("管理员口令校验失败");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.jwt.generate_token(admin.id, &admin.email, ROLE_ADMIN, None)?;
        info!(admin_id = admin.id, "管理员登录成功");

        Ok(LoginResponse {
            token,
            email: admin.email,
            full_name: admin.full_name,
            role: ROLE_ADMIN.to_string(),
            employee_id: None,
        })
    }

    /// 员工登录
    ///
    /// 证件号定位员工，邮箱大小写不敏感比对；提供口令时必须与存储值一致
    #[instrument(skip(self, request), fields(document = %request.document))]
    pub fn employee_login(&self, request: EmployeeLoginRequest) -> ApiResult<LoginResponse> {
        let employee = self
            .employees
            .find_by_document(request.document.trim())?
            .ok_or(AuthError::InvalidCredentials)?;

        if employee.email.to_lowercase() != request.email.trim().to_lowercase() {
            warn!("员工邮箱不匹配");
            return Err(AuthError::InvalidCredentials.into());
        }

        if let Some(password) = request.password.as_deref() {
            if !plaintext_matches(password, &employee.password) {
                warn!("员工口令不匹配");
                return Err(AuthError::InvalidCredentials.into());
            }
        }

        let token = self.jwt.generate_token(
            employee.id,
            &employee.email,
            ROLE_EMPLOYEE,
            Some(&employee.document),
        )?;
        info!(employee_id = employee.id, "员工登录成功");

        Ok(LoginResponse {
            token,
            email: employee.email,
            full_name: employee.full_name,
            role: ROLE_EMPLOYEE.to_string(),
            employee_id: Some(employee.id),
        })
    }

    pub fn validate_token(&self, token: &str) -> ApiResult<Claims> {
        let token = JwtService::extract_from_header(token).unwrap_or(token);
        Ok(self.jwt.validate_token(token)?)
    }

    /// 写入种子管理员（已存在则不修改）
    ///
    /// # 返回
    /// - true: 新建
    /// - false: 已存在
    pub fn seed_admin(&self, email: &str, full_name: &str, password: &str) -> ApiResult<bool> {
        if password.is_empty() {
            return Err(ApiError::InvalidInput("管理员口令不能为空".to_string()));
        }
        if self.admins.find_by_email(email)?.is_some() {
            return Ok(false);
        }

        let hash = hash_password(password)?;
        let created = self.admins.insert_if_absent(email, full_name, &hash, true)?;
        if created {
            info!(email = %email, "种子管理员已创建");
        }
        Ok(created)
    }
}
