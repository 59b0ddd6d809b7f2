//! # لایه ذخیره‌سازی (In-Memory Store)
//!
//! جدول لینک‌ها و جدول کاربران در حافظه نگهداری میشن و با ری‌استارت از
//! بین میرن. هیچ state سراسری (global) نداریم؛ هر store یه handle قابل
//! clone هست که به سرویس‌ها تزریق میشه.
//!
//! ## مفاهیم Rust:
//! - **Arc<RwLock<T>>**: اشتراک امن جدول بین task‌ها
//! - **Trait Objects**: `CodeGenerator` و `Clock` قابل تعویض در تست
//! - **Repository Pattern**: منطق برنامه نمیدونه داده کجا ذخیره میشه
//!
//! ## قفل‌گذاری
//! هر جدول یه `tokio::sync::RwLock` سراسری داره. هر دنباله
//! read-modify-write (ساخت، ویرایش، حذف، ثبت بازدید، ثبت‌نام) کامل زیر
//! یک write guard اجرا میشه تا شمارنده‌ها و بررسی مالکیت race نداشته باشن.

mod link_store;
mod user_store;

pub use link_store::*;
pub use user_store::*;

use chrono::{DateTime, Utc};

use crate::utils;

// =====================================
// IdentifierGenerator
// =====================================
/// تولیدکننده short code
///
/// یکتا بودن رو تضمین نمیکنه؛ `LinkStore` برخورد رو چک و تلاش مجدد میکنه.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator {
    /// تولید یک کد به طول `length`
    fn generate(&self, length: usize) -> String;
}

/// پیاده‌سازی پیش‌فرض با `rand` روی الفبای ۶۲ نمادی
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        utils::generate_short_code_with_length(length)
    }
}

// =====================================
// Clock
// =====================================
/// منبع زمان برای `created_at`
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// ساعت سیستم
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
