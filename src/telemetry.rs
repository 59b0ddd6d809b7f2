//! # راه‌اندازی لاگینگ (Tracing)
//!
//! کتابخانه خودش subscriber نصب نمیکنه؛ برنامه‌ای که ازش استفاده میکنه
//! یک بار `init_tracing` رو صدا میزنه.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    config::Config,
    error::{AppError, Result},
};

/// راه‌اندازی سیستم tracing
///
/// # مفاهیم:
/// - `RUST_LOG` اگه باشه اولویت داره، وگرنه `config.log_filter`
/// - development: فرمت pretty، production: خروجی JSON
///
/// # Errors
/// `Config` اگه فیلتر نامعتبر باشه یا subscriber قبلا نصب شده باشه
pub fn init_tracing(config: &Config) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.environment.is_production() {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_level(true)
                    .pretty(),
            )
            .try_init()
    };

    installed.map_err(|e| AppError::Config(format!("Tracing already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = Config::default();

        // تست‌های دیگه ممکنه قبلا نصب کرده باشن؛ فقط دومی مهمه
        let _ = init_tracing(&config);
        assert!(matches!(init_tracing(&config), Err(AppError::Config(_))));
    }
}
