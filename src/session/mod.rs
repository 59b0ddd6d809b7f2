//! # Visit Tracking
//!
//! هر session یه مجموعه از short code‌هایی داره که قبلا به عنوان بازدید
//! یکتا شمرده شدن. نگهداری این مجموعه (مثلا در cookie) کار لایه session
//! بیرونی هست؛ `LinkStore` فقط از طریق trait زیر بهش دسترسی داره.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};

use crate::models::ShortCode;

// =====================================
// VisitTracker Trait
// =====================================
/// دسترسی به مجموعه بازدیدهای یک session
///
/// # مفاهیم:
/// - Trait در مرز کتابخانه با collaborator بیرونی
/// - `mark_visited` باید idempotent باشه
pub trait VisitTracker {
    /// آیا این session قبلا این کد رو دیده؟
    fn has_visited(&self, code: &str) -> bool;

    /// ثبت بازدید این کد برای session
    fn mark_visited(&mut self, code: &ShortCode);
}

// =====================================
// SessionVisits
// =====================================
/// پیاده‌سازی پیش‌فرض با `HashSet`
///
/// `Serialize`/`Deserialize` داره تا لایه session بتونه ذخیره‌ش کنه.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionVisits {
    visited: HashSet<ShortCode>,
}

impl SessionVisits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

impl VisitTracker for SessionVisits {
    fn has_visited(&self, code: &str) -> bool {
        self.visited.contains(code)
    }

    fn mark_visited(&mut self, code: &ShortCode) {
        self.visited.insert(code.clone());
    }
}

impl FromIterator<ShortCode> for SessionVisits {
    fn from_iter<I: IntoIterator<Item = ShortCode>>(iter: I) -> Self {
        Self {
            visited: iter.into_iter().collect(),
        }
    }
}
