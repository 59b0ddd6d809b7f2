//! # ماژول مدیریت خطاها (Error Handling)
//!
//! این ماژول سیستم مدیریت خطای کتابخانه رو تعریف میکنه.
//!
//! ## مفاهیم Rust:
//! - **Custom Error Types**: تعریف نوع خطای سفارشی با `thiserror`
//! - **Result Type Alias**: alias برای ساده‌تر شدن کد
//! - **Error Propagation**: انتشار خطا با `?`
//!
//! هیچ عملیاتی خطا رو بی‌صدا نادیده نمیگیره؛ هر شکست یه variant از
//! `AppError` هست و لایه HTTP بیرونی با `status_code()` یا `IntoResponse`
//! اون رو به پاسخ تبدیل میکنه.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

// =====================================
// Result Type Alias
// =====================================
/// نوع Result سفارشی کتابخانه
///
/// به جای نوشتن `Result<Link, AppError>` میتونیم بنویسیم `Result<Link>`
pub type Result<T, E = AppError> = std::result::Result<T, E>;

// =====================================
// Custom Error Enum
// =====================================
/// خطای اصلی کتابخانه
///
/// هر variant یک نوع شکست با معنای مشخص هست.
#[derive(Debug, Error)]
pub enum AppError {
    // ----------------------------------------
    // خطاهای کاربر (4xx)
    // ----------------------------------------

    /// ورودی نامعتبر (URL، ایمیل یا رمز خالی) - 400
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// نیاز به ورود - 401
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// لینک مال کاربر دیگه‌ای هست - 403
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// پیدا نشد - 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// ایمیل قبلا ثبت شده - 409
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    // ----------------------------------------
    // خطاهای سرور (5xx)
    // ----------------------------------------

    /// بعد از همه تلاش‌ها کد یکتا پیدا نشد - 503
    #[error("Could not allocate a unique short code after {attempts} attempts")]
    CapacityExhausted { attempts: u32 },

    /// خطای داخلی (مثلا شکست hashing) - 500
    #[error("Internal error: {0}")]
    Internal(String),

    /// خطای تنظیمات
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// گرفتن HTTP status code متناسب با خطا
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateEmail(_) => StatusCode::CONFLICT,

            // 5xx Server Errors
            Self::CapacityExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// آیا این یه خطای سرور هست؟
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// کد ماشینی خطا برای بدنه پاسخ
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::CapacityExhausted { .. } => "CAPACITY_EXHAUSTED",
            Self::Internal(_) => "INTERNAL",
            Self::Config(_) => "CONFIG",
        }
    }

    /// ساخت خطای Not Found برای لینک
    #[must_use]
    pub fn link_not_found(short_code: &str) -> Self {
        Self::NotFound(format!("Link with code '{}' not found", short_code))
    }

    /// ساخت خطای Forbidden برای لینک
    #[must_use]
    pub fn not_owner(short_code: &str) -> Self {
        Self::Forbidden(format!("Link '{}' belongs to someone else", short_code))
    }

    /// ساخت خطای Not Found برای کاربر
    #[must_use]
    pub fn user_not_found(user_id: &str) -> Self {
        Self::NotFound(format!("User '{}' not found", user_id))
    }

    /// ساخت خطای نیاز به ورود
    #[must_use]
    pub fn login_required() -> Self {
        Self::Unauthenticated("Please log in first".to_string())
    }
}

// =====================================
// Error Response DTO
// =====================================
/// ساختار پاسخ خطا برای لایه HTTP
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// کد خطا (مثلا "NOT_FOUND")
    pub error: String,

    /// پیام خطا
    pub message: String,

    /// کد وضعیت HTTP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ErrorResponse {
    /// ساخت پاسخ خطای جدید
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// اضافه کردن کد وضعیت
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status.as_u16());
        self
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse::new(err.kind(), err.to_string()).with_status(err.status_code())
    }
}

// =====================================
// IntoResponse Implementation
// =====================================
/// تبدیل AppError به Response HTTP
///
/// این باعث میشه لایه HTTP بیرونی بتونه `Result<_, AppError>` رو مستقیم
/// از handler برگردونه.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(error = %self, "Server error occurred");
        }

        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

// =====================================
// From Implementations
// =====================================

// خطای validator همیشه یعنی ورودی نامعتبر
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

// =====================================
// Result Extensions
// =====================================
/// Extension trait برای Result
pub trait ResultExt<T, E> {
    /// تبدیل خطا به AppError::Internal
    fn map_internal(self) -> Result<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for std::result::Result<T, E> {
    fn map_internal(self) -> Result<T> {
        self.map_err(|e| AppError::Internal(e.to_string()))
    }
}

// =====================================
// Option Extensions
// =====================================
/// Extension trait برای Option
pub trait OptionExt<T> {
    /// تبدیل None به AppError::NotFound
    fn ok_or_not_found(self, message: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AppError::NotFound(message.into()))
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidInput("empty".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::login_required().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::not_owner("abc123").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::link_not_found("abc123").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DuplicateEmail("a@b.c".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::CapacityExhausted { attempts: 10 }.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_response_from_error() {
        let err = AppError::link_not_found("abc123");
        let response = ErrorResponse::from(&err);

        assert_eq!(response.error, "NOT_FOUND");
        assert_eq!(response.status_code, Some(404));
        assert!(response.message.contains("abc123"));
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = AppError::not_owner("xyz789").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_capacity_message_names_attempts() {
        let err = AppError::CapacityExhausted { attempts: 7 };
        assert!(err.to_string().contains("7 attempts"));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_option_extension() {
        let some_value: Option<i32> = Some(42);
        let none_value: Option<i32> = None;

        assert!(some_value.ok_or_not_found("not found").is_ok());
        assert!(matches!(
            none_value.ok_or_not_found("not found"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_result_extension() {
        let err: std::result::Result<i32, &str> = Err("original error");
        assert!(matches!(err.map_internal(), Err(AppError::Internal(_))));
    }
}
