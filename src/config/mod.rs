//! # ماژول تنظیمات (Configuration)
//!
//! این ماژول مسئول خوندن و مدیریت تنظیمات کتابخانه هست.
//!
//! ## مفاهیم Rust:
//! - **Default Trait**: مقادیر پیش‌فرض
//! - **Serde**: سریالایز/دسریالایز
//! - **Builder Pattern**: ساخت تدریجی آبجکت

use std::env;
use serde::{Deserialize, Serialize};
use crate::error::{AppError, Result};
use crate::utils::{DEFAULT_SHORT_CODE_LENGTH, MAX_SHORT_CODE_LENGTH};

/// تعداد پیش‌فرض تلاش برای پیدا کردن کد یکتا
pub const DEFAULT_MAX_CODE_ATTEMPTS: u32 = 10;

/// فیلتر پیش‌فرض لاگ
pub const DEFAULT_LOG_FILTER: &str = "tinylink=debug";

/// تنظیمات اصلی کتابخانه
///
/// # مثال
/// ```rust
/// use tinylink::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.short_code_length, 6);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// طول کد کوتاه
    pub short_code_length: usize,

    /// حداکثر تلاش برای تولید کد یکتا قبل از `CapacityExhausted`
    pub max_code_attempts: u32,

    /// فیلتر لاگ وقتی `RUST_LOG` تنظیم نشده
    pub log_filter: String,

    /// محیط اجرا (development, production)
    pub environment: Environment,
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// محیط توسعه - لاگ خوانا
    #[default]
    Development,

    /// محیط تست
    Testing,

    /// محیط تولید - لاگ JSON
    Production,
}

impl Environment {
    /// آیا در محیط توسعه هستیم؟
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// آیا در محیط تولید هستیم؟
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            short_code_length: DEFAULT_SHORT_CODE_LENGTH,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            environment: Environment::Development,
        }
    }
}

impl Config {
    /// ساخت تنظیمات از متغیرهای محیطی
    ///
    /// متغیرها: `ENVIRONMENT`، `SHORT_CODE_LENGTH`، `MAX_CODE_ATTEMPTS`،
    /// `LOG_FILTER`. فایل `.env` هم اگه باشه خونده میشه.
    ///
    /// # Errors
    /// خطا برمیگردونه اگه مقدار عددی قابل parse نباشه یا اعتبارسنجی fail بشه
    pub fn from_env() -> Result<Self> {
        // نبودن فایل .env اشکالی نداره
        dotenvy::dotenv().ok();

        let get_env = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        // برخلاف default بی‌صدا، مقدار خراب رو گزارش میدیم
        fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
            match env::var(key) {
                Ok(raw) => raw.trim().parse().map_err(|_| {
                    AppError::Config(format!("{} must be a number, got '{}'", key, raw))
                }),
                Err(_) => Ok(default),
            }
        }

        let config = Self {
            short_code_length: parse_env("SHORT_CODE_LENGTH", DEFAULT_SHORT_CODE_LENGTH)?,
            max_code_attempts: parse_env("MAX_CODE_ATTEMPTS", DEFAULT_MAX_CODE_ATTEMPTS)?,
            log_filter: get_env("LOG_FILTER", DEFAULT_LOG_FILTER),
            environment: get_env("ENVIRONMENT", "development").into(),
        };

        config.validate()?;
        Ok(config)
    }

    /// اعتبارسنجی تنظیمات
    ///
    /// # Errors
    /// `AppError::Config` برای طول کد یا تعداد تلاش نامعتبر
    pub fn validate(&self) -> Result<()> {
        if self.short_code_length == 0 || self.short_code_length > MAX_SHORT_CODE_LENGTH {
            return Err(AppError::Config(format!(
                "SHORT_CODE_LENGTH must be between 1 and {}",
                MAX_SHORT_CODE_LENGTH
            )));
        }

        if self.max_code_attempts == 0 {
            return Err(AppError::Config(
                "MAX_CODE_ATTEMPTS cannot be 0".to_string()
            ));
        }

        Ok(())
    }
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config با Builder Pattern
///
/// # مثال
/// ```rust
/// use tinylink::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .short_code_length(8)
///     .max_code_attempts(3)
///     .build();
/// assert_eq!(config.short_code_length, 8);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// ساخت builder جدید
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// تنظیم طول کد کوتاه
    #[must_use]
    pub fn short_code_length(mut self, length: usize) -> Self {
        self.config.short_code_length = length;
        self
    }

    /// تنظیم حداکثر تلاش
    #[must_use]
    pub fn max_code_attempts(mut self, attempts: u32) -> Self {
        self.config.max_code_attempts = attempts;
        self
    }

    /// تنظیم فیلتر لاگ
    #[must_use]
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.log_filter = filter.into();
        self
    }

    /// تنظیم محیط
    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    /// ساخت Config نهایی
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_validated(self) -> Result<Config> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.short_code_length, 6);
        assert_eq!(config.max_code_attempts, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .short_code_length(8)
            .environment(Environment::Production)
            .build();

        assert_eq!(config.short_code_length, 8);
        assert!(config.environment.is_production());
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from("production".to_string()), Environment::Production);
        assert_eq!(Environment::from("TEST".to_string()), Environment::Testing);
        assert_eq!(Environment::from("unknown".to_string()), Environment::Development);
    }

    #[test]
    fn test_validation_rejects_zero_length() {
        let result = ConfigBuilder::new().short_code_length(0).build_validated();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_zero_attempts() {
        let result = ConfigBuilder::new().max_code_attempts(0).build_validated();
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
