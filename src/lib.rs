//! # Tinylink
//!
//! کتابخانه کوتاه‌کننده لینک با مالکیت: هر لینک مال یک کاربره و فقط همون
//! کاربر میتونه ببینه، ویرایش یا حذف کنه؛ redirect برای همه آزاده.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه - اینجا!
//! ├── config/         # مدیریت تنظیمات
//! ├── error/          # تعریف خطاها
//! ├── models/         # مدل‌های داده
//! ├── store/          # جدول‌های در حافظه و تولید کد
//! ├── access/         # قوانین مالکیت
//! ├── session/        # ردیابی بازدید یکتا در هر session
//! ├── services/       # منطق کسب‌وکار
//! ├── telemetry.rs    # راه‌اندازی لاگ
//! └── utils/          # توابع کمکی
//! ```
//!
//! ## مثال استفاده
//!
//! ```rust,no_run
//! use tinylink::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let state = AppState::new(Config::from_env()?)?;
//!
//!     let user = state
//!         .auth_service
//!         .register(RegisterRequest::new("alice@example.com", "secret"))
//!         .await?;
//!     let caller = state.auth_service.resolve_caller(Some(user.id.as_str())).await;
//!
//!     let link = state
//!         .link_service
//!         .shorten(&caller, ShortenRequest::new("http://example.com"))
//!         .await?;
//!
//!     let mut visits = SessionVisits::new();
//!     let target = state
//!         .link_service
//!         .visit(link.short_code.as_str(), &mut visits)
//!         .await?;
//!     assert_eq!(target, "http://example.com");
//!     Ok(())
//! }
//! ```

// =====================================
// Module Declarations
// =====================================

/// ماژول مدیریت تنظیمات
pub mod config;

/// ماژول تعریف و مدیریت خطاها
pub mod error;

/// ماژول مدل‌های داده (Domain Models)
pub mod models;

/// جدول‌های در حافظه
pub mod store;

/// قوانین دسترسی
pub mod access;

/// بازدیدهای هر session
pub mod session;

/// ماژول سرویس‌ها (Business Logic)
pub mod services;

pub mod telemetry;

/// ماژول توابع کمکی
pub mod utils;

// =====================================
// Re-exports
// =====================================

/// نتیجه عملیات با خطای سفارشی
pub use error::Result;

/// خطای اصلی کتابخانه
pub use error::AppError;

// =====================================
// Prelude Module
// =====================================
/// ماژول prelude برای import راحت‌تر آیتم‌های پرکاربرد
///
/// ```rust
/// use tinylink::prelude::*;
/// ```
pub mod prelude {
    pub use crate::access::AccessGuard;
    pub use crate::config::Config;
    pub use crate::error::{AppError, Result};
    pub use crate::models::*;
    pub use crate::services::*;
    pub use crate::session::{SessionVisits, VisitTracker};
    pub use crate::store::{LinkStore, UserStore};
}
