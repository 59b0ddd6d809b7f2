//! # ماژول مدل‌ها (Domain Models)
//!
//! این ماژول مدل‌های داده کتابخانه رو تعریف میکنه.
//!
//! ## مفاهیم Rust:
//! - **Newtype Pattern**: `UserId` و `ShortCode` دور `String`
//! - **Enums**: `Caller` برای کاربر لاگین کرده یا ناشناس
//! - **Serialize/Deserialize**: تبدیل JSON
//! - **Validation**: اعتبارسنجی DTO‌ها با `validator`

mod link;
mod user;

pub use link::*;
pub use user::*;

use std::borrow::Borrow;
use serde::{Deserialize, Serialize};

// =====================================
// UserId (Newtype Pattern)
// =====================================
/// شناسه یکتای کاربر
///
/// # Newtype Pattern
/// جلوی قاطی شدن شناسه کاربر با short code یا ایمیل رو میگیره.
///
/// ```rust
/// use tinylink::models::UserId;
///
/// let id = UserId::new();
/// assert_eq!(id.as_str().len(), 21);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// ساخت شناسه جدید با nanoid
    #[must_use]
    pub fn new() -> Self {
        Self(nanoid::nanoid!(21))
    }

    /// گرفتن به عنوان &str
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =====================================
// ShortCode
// =====================================
/// کلید یکتای یک لینک
///
/// بعد از ساخته شدن تغییر نمیکنه؛ فقط `LinkStore` کد جدید میسازه.
/// `Borrow<str>` اجازه میده با `&str` توی map جستجو کنیم.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShortCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for ShortCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =====================================
// Caller
// =====================================
/// هویتی که یک درخواست از طرفش اجرا میشه
///
/// لایه session بیرونی این رو از طریق `AccessGuard::resolve` میسازه؛
/// شناسه‌ای که دیگه در جدول کاربران نیست `Anonymous` حساب میشه.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caller {
    /// کاربر وارد نشده
    #[default]
    Anonymous,

    /// کاربر وارد شده
    User(UserId),
}

impl Caller {
    /// ساخت Caller برای یک کاربر
    #[must_use]
    pub fn user(id: impl Into<UserId>) -> Self {
        Self::User(id.into())
    }

    /// شناسه کاربر اگه لاگین باشه
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::User(id) => Some(id),
            Self::Anonymous => None,
        }
    }
}

impl std::fmt::Display for Caller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::User(id) => write!(f, "{}", id),
        }
    }
}
