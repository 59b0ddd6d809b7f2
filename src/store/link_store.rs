//! # Link Store
//!
//! مالک انحصاری همه رکوردهای `Link`: ساخت، خوندن، ویرایش، حذف و شمارش
//! بازدید. مالکیت در ویرایش و حذف دوباره همینجا زیر قفل چک میشه، حتی اگه
//! لایه بالا قبلا `AccessGuard` رو صدا زده باشه.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::{Clock, CodeGenerator, RandomCodeGenerator, SystemClock};
use crate::{
    access::AccessGuard,
    config::Config,
    error::{AppError, Result},
    models::{Caller, Link, ShortCode, UserId},
    session::VisitTracker,
    utils,
};

// =====================================
// Internal Table
// =====================================
/// ردیف جدول: رکورد به همراه ترتیب درج
#[derive(Debug)]
struct Row {
    seq: u64,
    link: Link,
}

/// جدول لینک‌ها
///
/// `seq` ترتیب درج رو نگه میداره تا `list_by_owner` همیشه ترتیب
/// قطعی داشته باشه، مستقل از ترتیب داخلی `HashMap`.
#[derive(Debug, Default)]
struct LinkTable {
    rows: HashMap<ShortCode, Row>,
    next_seq: u64,
}

impl LinkTable {
    fn insert(&mut self, link: Link) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.rows.insert(link.short_code.clone(), Row { seq, link });
    }
}

// =====================================
// LinkStore
// =====================================
/// Store لینک‌ها
///
/// # مفاهیم:
/// - `Clone` ارزونه: فقط `Arc`‌ها clone میشن و همه handle‌ها یک جدول رو
///   میبینن
/// - تولیدکننده کد و ساعت تزریق میشن
#[derive(Clone)]
pub struct LinkStore {
    table: Arc<RwLock<LinkTable>>,
    generator: Arc<dyn CodeGenerator + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
    code_length: usize,
    max_attempts: u32,
}

impl std::fmt::Debug for LinkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkStore")
            .field("code_length", &self.code_length)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

impl LinkStore {
    /// ساخت store خالی با تولیدکننده تصادفی و ساعت سیستم
    ///
    /// # Errors
    /// `Config` اگه تنظیمات معتبر نباشه
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_parts(
            config,
            Arc::new(RandomCodeGenerator),
            Arc::new(SystemClock),
        )
    }

    /// ساخت store با collaborator‌های دلخواه (برای تست یا جایگزینی)
    ///
    /// طول صفر کد خالی میسازه و تعداد تلاش صفر هر `create` رو رد میکنه،
    /// پس config همینجا validate میشه.
    ///
    /// # Errors
    /// `Config` اگه تنظیمات معتبر نباشه
    pub fn with_parts(
        config: &Config,
        generator: Arc<dyn CodeGenerator + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            table: Arc::new(RwLock::new(LinkTable::default())),
            generator,
            clock,
            code_length: config.short_code_length,
            max_attempts: config.max_code_attempts,
        })
    }

    /// ساخت لینک جدید
    ///
    /// # Errors
    /// - `InvalidInput`: URL خالی
    /// - `CapacityExhausted`: بعد از `max_code_attempts` تلاش کد آزاد پیدا نشد
    #[instrument(skip(self, long_url), fields(owner = %owner_id))]
    pub async fn create(&self, long_url: &str, owner_id: &UserId) -> Result<ShortCode> {
        if utils::is_blank(long_url) {
            return Err(AppError::InvalidInput("Long URL cannot be empty".to_string()));
        }

        // بررسی برخورد و درج زیر یک guard
        let mut table = self.table.write().await;
        let code = self.allocate_code(&table)?;

        let link = Link::new(code.clone(), long_url, owner_id.clone(), self.clock.now());
        table.insert(link);

        info!(short_code = %code, "Created link");
        Ok(code)
    }

    /// پیدا کردن کد آزاد با تعداد تلاش محدود
    fn allocate_code(&self, table: &LinkTable) -> Result<ShortCode> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate(self.code_length);

            if !table.rows.contains_key(candidate.as_str()) {
                return Ok(ShortCode::new(candidate));
            }

            debug!(attempt, code = %candidate, "Short code collision");
        }

        warn!(attempts = self.max_attempts, "Short code space exhausted");
        Err(AppError::CapacityExhausted {
            attempts: self.max_attempts,
        })
    }

    /// گرفتن یک snapshot از رکورد
    ///
    /// # Errors
    /// `NotFound` اگه کد وجود نداشته باشه
    pub async fn get(&self, short_code: &str) -> Result<Link> {
        let table = self.table.read().await;

        table
            .rows
            .get(short_code)
            .map(|row| row.link.clone())
            .ok_or_else(|| AppError::link_not_found(short_code))
    }

    /// همه لینک‌های یک مالک، به ترتیب ساخت
    pub async fn list_by_owner(&self, owner_id: &UserId) -> Vec<Link> {
        let table = self.table.read().await;

        let mut rows: Vec<&Row> = table
            .rows
            .values()
            .filter(|row| row.link.is_owned_by(owner_id))
            .collect();
        rows.sort_by_key(|row| row.seq);

        rows.into_iter().map(|row| row.link.clone()).collect()
    }

    /// عوض کردن مقصد لینک و صفر کردن آمار
    ///
    /// ترتیب بررسی: وجود، مالکیت، بعد خالی نبودن URL جدید.
    ///
    /// # Errors
    /// `NotFound`، `Forbidden` یا `InvalidInput`
    #[instrument(skip(self, new_long_url), fields(caller = %caller))]
    pub async fn update_long_url(
        &self,
        short_code: &str,
        new_long_url: &str,
        caller: &Caller,
    ) -> Result<Link> {
        let mut table = self.table.write().await;

        let row = table
            .rows
            .get_mut(short_code)
            .ok_or_else(|| AppError::link_not_found(short_code))?;

        AccessGuard::ensure_can_mutate(caller, &row.link)?;

        if utils::is_blank(new_long_url) {
            return Err(AppError::InvalidInput(
                "You may not set the link to an empty string".to_string(),
            ));
        }

        row.link.retarget(new_long_url);

        info!(short_code = %short_code, "Updated link target");
        Ok(row.link.clone())
    }

    /// حذف لینک توسط مالک
    ///
    /// # Errors
    /// `NotFound` یا `Forbidden`
    #[instrument(skip(self), fields(caller = %caller))]
    pub async fn delete(&self, short_code: &str, caller: &Caller) -> Result<()> {
        let mut table = self.table.write().await;

        let row = table
            .rows
            .get(short_code)
            .ok_or_else(|| AppError::link_not_found(short_code))?;

        AccessGuard::ensure_can_mutate(caller, &row.link)?;

        table.rows.remove(short_code);

        info!(short_code = %short_code, "Deleted link");
        Ok(())
    }

    /// ثبت یک بازدید و برگردوندن URL اصلی برای redirect
    ///
    /// مالکیت اینجا مهم نیست؛ هر کسی (حتی ناشناس) میتونه بازدید کنه.
    /// `visit_count` همیشه زیاد میشه، `unique_visit_count` فقط اولین بار
    /// برای این session.
    ///
    /// # Errors
    /// `NotFound` اگه کد وجود نداشته باشه
    #[instrument(skip(self, visits))]
    pub async fn record_visit<V>(&self, short_code: &str, visits: &mut V) -> Result<String>
    where
        V: VisitTracker + ?Sized,
    {
        let mut table = self.table.write().await;

        let row = table
            .rows
            .get_mut(short_code)
            .ok_or_else(|| AppError::link_not_found(short_code))?;

        let link = &mut row.link;
        link.visit_count += 1;

        if !visits.has_visited(short_code) {
            link.unique_visit_count += 1;
            visits.mark_visited(&link.short_code);
        }

        debug!(
            visits = link.visit_count,
            unique = link.unique_visit_count,
            "Recorded visit"
        );
        Ok(link.long_url.clone())
    }

    /// تعداد کل لینک‌ها
    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}
