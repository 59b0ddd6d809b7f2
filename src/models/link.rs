//! # مدل لینک
//!
//! Entity و DTO‌های مربوط به لینک کوتاه

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ShortCode, UserId};

// =====================================
// Link Entity
// =====================================
/// رکورد یک لینک کوتاه
///
/// # Invariants
/// - `short_code` و `owner_id` بعد از ساخت عوض نمیشن
/// - `visit_count >= unique_visit_count`
///
/// فقط `LinkStore` این رکورد رو میسازه یا تغییر میده؛ بیرون از store
/// همیشه یه کپی (snapshot) دست کاربر میرسه.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// کد کوتاه (مثلا "abc123")
    pub short_code: ShortCode,

    /// آدرس اصلی
    pub long_url: String,

    /// سازنده لینک
    pub owner_id: UserId,

    /// تاریخ ساخت
    pub created_at: DateTime<Utc>,

    /// همه بازدیدها
    pub visit_count: u64,

    /// بازدید از session‌های متمایز
    pub unique_visit_count: u64,
}

impl Link {
    /// ساخت رکورد تازه با شمارنده‌های صفر
    #[must_use]
    pub fn new(
        short_code: ShortCode,
        long_url: impl Into<String>,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_code,
            long_url: long_url.into(),
            owner_id,
            created_at,
            visit_count: 0,
            unique_visit_count: 0,
        }
    }

    /// آیا این کاربر مالک لینکه؟
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// تاریخ ساخت به فرمت `yyyy-mm-dd`
    #[must_use]
    pub fn created_on(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }

    /// عوض کردن مقصد؛ آمار قبلی دیگه معنی نداره و صفر میشه
    pub(crate) fn retarget(&mut self, long_url: impl Into<String>) {
        self.long_url = long_url.into();
        self.visit_count = 0;
        self.unique_visit_count = 0;
    }
}

// =====================================
// API Request DTOs
// =====================================
/// درخواست ساخت لینک کوتاه
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(custom(function = "crate::utils::validate_not_blank", message = "Long URL is required"))]
    pub long_url: String,
}

impl ShortenRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
        }
    }
}

/// درخواست عوض کردن مقصد لینک
///
/// اینجا validate نمیشه: مالکیت باید قبل از خالی بودن URL چک بشه و
/// این کار داخل `LinkStore::update_long_url` انجام میشه.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLinkRequest {
    pub new_long_url: String,
}

impl UpdateLinkRequest {
    pub fn new(new_long_url: impl Into<String>) -> Self {
        Self {
            new_long_url: new_long_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Link {
        let created = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        Link::new(ShortCode::from("abc123"), "http://example.com", UserId::from("U1"), created)
    }

    #[test]
    fn test_new_link_starts_at_zero() {
        let link = sample();
        assert_eq!(link.visit_count, 0);
        assert_eq!(link.unique_visit_count, 0);
        assert!(link.is_owned_by(&UserId::from("U1")));
        assert!(!link.is_owned_by(&UserId::from("U2")));
    }

    #[test]
    fn test_created_on_format() {
        assert_eq!(sample().created_on(), "2024-03-07");
    }

    #[test]
    fn test_retarget_resets_counters() {
        let mut link = sample();
        link.visit_count = 5;
        link.unique_visit_count = 2;

        link.retarget("http://example.org");

        assert_eq!(link.long_url, "http://example.org");
        assert_eq!(link.visit_count, 0);
        assert_eq!(link.unique_visit_count, 0);
    }

    #[test]
    fn test_shorten_request_rejects_empty_url() {
        let request = ShortenRequest { long_url: String::new() };
        assert!(request.validate().is_err());
    }
}
