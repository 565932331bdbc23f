// ==========================================
// TalentoPlus 人事管理系统 - 认证错误类型
// ==========================================

use thiserror::Error;

/// 认证错误
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("密码哈希失败: {0}")]
    HashFailed(String),

    #[error("凭据无效")]
    InvalidCredentials,
}

/// Result 类型别名
pub type AuthResult<T> = Result<T, AuthError>;
