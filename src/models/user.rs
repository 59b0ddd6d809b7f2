//! # مدل کاربر (User Model)
//!
//! Entity و DTO‌های مربوط به کاربر

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::UserId;

// =====================================
// User Entity
// =====================================
/// Entity کاربر
///
/// # امنیت
/// `password_hash` هیچوقت به بیرون داده نمیشه؛ برای خروجی از
/// `UserResponse` استفاده کنید.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,

    /// هش رمز عبور - فرمتش رو `CredentialVerifier` تعیین میکنه
    pub password_hash: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}

// =====================================
// API Request DTOs
// =====================================
/// درخواست ثبت‌نام
///
/// فقط خالی نبودن چک میشه (`utils::is_blank`)؛ قوانین سخت‌تر کار لایه بیرونی هست.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "crate::utils::validate_not_blank", message = "Email is required"))]
    pub email: String,

    #[validate(custom(function = "crate::utils::validate_not_blank", message = "Password is required"))]
    pub password: String,
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// درخواست ورود
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "crate::utils::validate_not_blank", message = "Email is required"))]
    pub email: String,

    #[validate(custom(function = "crate::utils::validate_not_blank", message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// =====================================
// API Response DTOs
// =====================================
/// پاسخ اطلاعات کاربر
///
/// توجه: password_hash اینجا نیست!
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_drops_hash() {
        let user = User {
            id: UserId::from("U1"),
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };

        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("a@example.com"));
    }

    #[test]
    fn test_register_request_validation() {
        assert!(RegisterRequest::new("a@example.com", "pw").validate().is_ok());
        assert!(RegisterRequest::new("", "pw").validate().is_err());
        assert!(RegisterRequest::new("a@example.com", "").validate().is_err());
    }

    #[test]
    fn test_whitespace_only_fields_are_blank() {
        assert!(RegisterRequest::new("   ", "pw").validate().is_err());
        assert!(RegisterRequest::new("a@example.com", " \t").validate().is_err());
        assert!(LoginRequest::new(" ", "pw").validate().is_err());
        assert!(LoginRequest::new("a@example.com", "  ").validate().is_err());
    }
}
