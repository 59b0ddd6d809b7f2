//! # سرویس لینک
//!
//! عملیات سطح بالای لینک‌ها به نام یک `Caller`.
//!
//! ## ترتیب بررسی‌ها
//! - ساخت و لیست: اول ورود
//! - دیدن و حذف: ورود، وجود، مالکیت
//! - ویرایش: ورود، وجود، مالکیت، بعد خالی نبودن URL
//! - بازدید: فقط وجود؛ ناشناس هم میتونه

use tracing::{info, instrument};
use validator::Validate;

use super::Service;
use crate::{
    access::AccessGuard,
    error::Result,
    models::{Caller, Link, ShortenRequest, UpdateLinkRequest},
    session::VisitTracker,
    store::LinkStore,
};

// =====================================
// Link Service
// =====================================
/// سرویس مدیریت لینک‌ها
///
/// # مسئولیت‌ها:
/// - ساخت لینک برای کاربر وارد شده
/// - داشبورد: لیست لینک‌های خود کاربر
/// - ویرایش و حذف فقط توسط مالک
/// - redirect و شمارش بازدید
#[derive(Debug, Clone)]
pub struct LinkService {
    links: LinkStore,
    guard: AccessGuard,
}

impl Service for LinkService {}

impl LinkService {
    #[must_use]
    pub fn new(links: LinkStore, guard: AccessGuard) -> Self {
        Self { links, guard }
    }

    /// ساخت لینک کوتاه برای caller
    ///
    /// # Errors
    /// - `Unauthenticated`: caller وارد نشده
    /// - `InvalidInput`: URL خالی
    /// - `CapacityExhausted`: کد آزاد پیدا نشد
    #[instrument(skip(self, request), fields(caller = %caller))]
    pub async fn shorten(&self, caller: &Caller, request: ShortenRequest) -> Result<Link> {
        // Step 1: فقط کاربر واقعی
        let owner_id = self.guard.authenticate(caller).await?;

        // Step 2: اعتبارسنجی
        request.validate()?;

        // Step 3: ذخیره
        let code = self.links.create(&request.long_url, &owner_id).await?;

        info!(short_code = %code, "Shortened URL");
        self.links.get(code.as_str()).await
    }

    /// لینک‌های خود caller به ترتیب ساخت
    ///
    /// # Errors
    /// `Unauthenticated` برای ناشناس
    pub async fn list(&self, caller: &Caller) -> Result<Vec<Link>> {
        let owner_id = self.guard.authenticate(caller).await?;
        Ok(self.links.list_by_owner(&owner_id).await)
    }

    /// جزئیات یک لینک (صفحه آمار)
    ///
    /// # Errors
    /// `Unauthenticated`، `NotFound` یا `Forbidden`
    pub async fn view(&self, caller: &Caller, short_code: &str) -> Result<Link> {
        self.guard.authenticate(caller).await?;

        let link = self.links.get(short_code).await?;
        AccessGuard::ensure_can_view(caller, &link)?;

        Ok(link)
    }

    /// عوض کردن مقصد لینک
    ///
    /// # Errors
    /// `Unauthenticated`، `NotFound`، `Forbidden` یا `InvalidInput`
    #[instrument(skip(self, request), fields(caller = %caller))]
    pub async fn edit(
        &self,
        caller: &Caller,
        short_code: &str,
        request: UpdateLinkRequest,
    ) -> Result<Link> {
        self.guard.authenticate(caller).await?;

        self.links
            .update_long_url(short_code, &request.new_long_url, caller)
            .await
    }

    /// حذف لینک
    ///
    /// # Errors
    /// `Unauthenticated`، `NotFound` یا `Forbidden`
    #[instrument(skip(self), fields(caller = %caller))]
    pub async fn remove(&self, caller: &Caller, short_code: &str) -> Result<()> {
        self.guard.authenticate(caller).await?;
        self.links.delete(short_code, caller).await
    }

    /// بازدید و گرفتن مقصد redirect
    ///
    /// # Errors
    /// `NotFound` اگه کد وجود نداشته باشه
    pub async fn visit<V>(&self, short_code: &str, visits: &mut V) -> Result<String>
    where
        V: VisitTracker + ?Sized,
    {
        self.links.record_visit(short_code, visits).await
    }
}
