//! # سرویس احراز هویت (Authentication Service)
//!
//! ثبت‌نام، ورود و تبدیل شناسه session به `Caller`.
//!
//! ## مفاهیم Rust:
//! - Password Hashing پشت trait `CredentialVerifier`
//! - Validation با `validator`
//! - Logging ساختاریافته با ایمیل mask شده

use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::{CredentialVerifier, Service};
use crate::{
    access::AccessGuard,
    error::{AppError, Result},
    models::{Caller, LoginRequest, RegisterRequest, User, UserId, UserResponse},
    store::UserStore,
    utils::mask_email,
};

// =====================================
// Auth Service
// =====================================
/// سرویس احراز هویت
///
/// # مسئولیت‌ها:
/// - ثبت‌نام کاربر (ایمیل یکتا)
/// - بررسی رمز عبور موقع ورود
/// - resolve کردن هویت session
///
/// خروج (logout) یعنی لایه session شناسه رو دور بریزه؛ اینجا کاری نداره.
#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    guard: AccessGuard,
    credentials: Arc<dyn CredentialVerifier + Send + Sync>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("users", &self.users)
            .finish_non_exhaustive()
    }
}

impl Service for AuthService {}

impl AuthService {
    /// ساخت سرویس جدید
    #[must_use]
    pub fn new(
        users: UserStore,
        guard: AccessGuard,
        credentials: Arc<dyn CredentialVerifier + Send + Sync>,
    ) -> Self {
        Self {
            users,
            guard,
            credentials,
        }
    }

    /// ثبت‌نام کاربر جدید
    ///
    /// # Errors
    /// - `InvalidInput`: ایمیل یا رمز خالی
    /// - `DuplicateEmail`: ایمیل تکراری (کاربر موجود تغییر نمیکنه)
    #[instrument(skip(self, request), fields(email = %mask_email(&request.email)))]
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse> {
        // Step 1: اعتبارسنجی
        request.validate()?;

        // Step 2: قبل از hash گرون، تکراری بودن رو چک کن
        // (بررسی قطعی دوباره داخل insert زیر قفل انجام میشه)
        if self.users.email_exists(&request.email).await {
            return Err(AppError::DuplicateEmail(request.email));
        }

        // Step 3: hash کردن رمز
        let password_hash = self.credentials.hash(&request.password)?;

        // Step 4: ذخیره
        let user = self
            .users
            .insert(User {
                id: UserId::new(),
                email: request.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "New user registered");
        Ok(user.into())
    }

    /// ورود کاربر
    ///
    /// ایمیل ناموجود و رمز اشتباه پیام یکسان دارن.
    ///
    /// # Errors
    /// - `InvalidInput`: فیلد خالی
    /// - `Unauthenticated`: اطلاعات ورود اشتباه
    #[instrument(skip(self, request), fields(email = %mask_email(&request.email)))]
    pub async fn login(&self, request: LoginRequest) -> Result<UserResponse> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await
            .ok_or_else(|| AppError::Unauthenticated("Invalid credentials".to_string()))?;

        if !self.credentials.verify(&request.password, &user.password_hash)? {
            warn!("Failed login attempt");
            return Err(AppError::Unauthenticated("Invalid credentials".to_string()));
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user.into())
    }

    /// گرفتن کاربر با ID
    ///
    /// # Errors
    /// `NotFound` اگه کاربر وجود نداشته باشه
    pub async fn get_user(&self, user_id: &str) -> Result<UserResponse> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .ok_or_else(|| AppError::user_not_found(user_id))?;

        Ok(user.into())
    }

    /// تبدیل شناسه session به `Caller`
    pub async fn resolve_caller(&self, session_user_id: Option<&str>) -> Caller {
        self.guard.resolve(session_user_id).await
    }
}
