// ==========================================
// TalentoPlus 人事管理系统 - 口令工具
// ==========================================
// 管理员: argon2 哈希
// 员工: 明文比对（历史数据兼容，见 DESIGN.md）
// ==========================================

use crate::auth::error::{AuthError, AuthResult};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// 生成 argon2 哈希（PHC 字符串）
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// 校验 argon2 哈希；哈希格式非法时视为不匹配
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// 员工口令明文比对
pub fn plaintext_matches(supplied: &str, stored: &str) -> bool {
    supplied == stored
}
