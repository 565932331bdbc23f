// ==========================================
// TalentoPlus 人事管理系统 - 认证模块
// ==========================================
// 职责: JWT 签发/校验、口令哈希
// 红线: 不访问数据库（凭据查询在 api::AuthApi）
// ==========================================

pub mod error;
pub mod jwt;
pub mod password;

pub use error::{AuthError, AuthResult};
pub use jwt::{Claims, JwtConfig, JwtService, ROLE_ADMIN, ROLE_EMPLOYEE};
