//! # ماژول سرویس‌ها (Business Logic Layer)
//!
//! این ماژول منطق کسب‌وکار کتابخانه رو پیاده‌سازی میکنه.
//!
//! ## لایه‌بندی معماری
//!
//! ```text
//! ┌─────────────────┐
//! │  Session Layer  │  <-- بیرون از کتابخانه (cookie, HTTP)
//! ├─────────────────┤
//! │  Service Layer  │  <-- Business logic (اینجا!)
//! ├─────────────────┤
//! │  Access Guard   │  <-- قوانین مالکیت
//! ├─────────────────┤
//! │     Stores      │  <-- جدول‌های در حافظه
//! └─────────────────┘
//! ```
//!
//! ## مفاهیم Rust:
//! - **Dependency Injection**: تزریق وابستگی‌ها
//! - **Traits برای Abstraction**: `CodeGenerator`، `Clock`، `CredentialVerifier`
//! - **Arc<T>**: اشتراک امن بین tasks

mod auth_service;
mod credentials;
mod link_service;

pub use auth_service::*;
pub use credentials::*;
pub use link_service::*;

use std::sync::Arc;

use crate::{
    access::AccessGuard,
    config::Config,
    error::Result,
    store::{Clock, CodeGenerator, LinkStore, RandomCodeGenerator, SystemClock, UserStore},
};

// =====================================
// Application State
// =====================================
/// وضعیت کتابخانه که بین همه درخواست‌ها اشتراک‌گذاری میشه
///
/// # مفاهیم:
/// - `Clone`: فقط `Arc`‌ها clone میشن، نه داده
/// - store‌ها و service‌ها همه یک جدول رو میبینن
#[derive(Clone, Debug)]
pub struct AppState {
    /// تنظیمات
    pub config: Arc<Config>,

    /// جدول لینک‌ها
    pub links: LinkStore,

    /// جدول کاربران
    pub users: UserStore,

    /// قوانین دسترسی
    pub guard: AccessGuard,

    /// سرویس لینک
    pub link_service: Arc<LinkService>,

    /// سرویس احراز هویت
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// ساخت state با پیاده‌سازی‌های پیش‌فرض
    ///
    /// # Errors
    /// `Config` اگه تنظیمات معتبر نباشه
    pub fn new(config: Config) -> Result<Self> {
        Self::with_collaborators(
            config,
            Arc::new(RandomCodeGenerator),
            Arc::new(SystemClock),
            Arc::new(Argon2Verifier::new()),
        )
    }

    /// ساخت state با collaborator‌های دلخواه
    ///
    /// # Errors
    /// `Config` اگه تنظیمات معتبر نباشه
    pub fn with_collaborators(
        config: Config,
        generator: Arc<dyn CodeGenerator + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
        credentials: Arc<dyn CredentialVerifier + Send + Sync>,
    ) -> Result<Self> {
        let links = LinkStore::with_parts(&config, generator, clock)?;
        let users = UserStore::new();
        let guard = AccessGuard::new(users.clone());

        let link_service = Arc::new(LinkService::new(links.clone(), guard.clone()));
        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            guard.clone(),
            credentials,
        ));

        Ok(Self {
            config: Arc::new(config),
            links,
            users,
            guard,
            link_service,
            auth_service,
        })
    }

    /// دسترسی به config
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// =====================================
// Service Trait
// =====================================
/// Marker trait برای services
///
/// همه services باید Send + Sync باشن تا بین tasks جابجا بشن.
pub trait Service: Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::error::AppError;
    use crate::models::{Caller, RegisterRequest, ShortenRequest};

    #[tokio::test]
    async fn test_state_shares_tables() {
        let state = AppState::with_collaborators(
            Config::default(),
            Arc::new(RandomCodeGenerator),
            Arc::new(SystemClock),
            Arc::new(Argon2Verifier::with_params(8, 1, 1).unwrap()),
        )
        .unwrap();
        let cloned = state.clone();

        let user = state
            .auth_service
            .register(RegisterRequest::new("a@example.com", "pw"))
            .await
            .unwrap();
        let caller = cloned.auth_service.resolve_caller(Some(user.id.as_str())).await;
        assert_eq!(caller, Caller::User(user.id.clone()));

        cloned
            .link_service
            .shorten(&caller, ShortenRequest::new("http://example.com"))
            .await
            .unwrap();

        assert_eq!(state.links.count().await, 1);
        assert_eq!(state.users.count().await, 1);
        assert_eq!(state.config().short_code_length, 6);
    }

    #[test]
    fn test_state_rejects_invalid_config() {
        let config = ConfigBuilder::new().max_code_attempts(0).build();
        assert!(matches!(AppState::new(config), Err(AppError::Config(_))));
    }
}
