//! # ماژول توابع کمکی (Utilities)
//!
//! تولید short code تصادفی و توابع کوچک اعتبارسنجی و لاگ.
//!
//! ## مفاهیم Rust:
//! - **static**: متغیرهای با عمر 'static
//! - **once_cell**: مقداردهی اولیه تنبل
//! - **Regex**: عبارات منظم

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use validator::ValidationError;

// =====================================
// Constants
// =====================================
/// الفبای ۶۲ نمادی short code: ارقام، حروف کوچک، حروف بزرگ
pub const SHORT_CODE_ALPHABET: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// طول پیش‌فرض short code
pub const DEFAULT_SHORT_CODE_LENGTH: usize = 6;

/// بیشترین طولی که تنظیمات اجازه میده
pub const MAX_SHORT_CODE_LENGTH: usize = 64;

/// الگوی کاراکترهای مجاز short code
pub static VALID_SHORT_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-zA-Z]+$").expect("Invalid regex pattern")
});

// =====================================
// Short Code Generation
// =====================================
/// تولید short code با طول پیش‌فرض
///
/// # مثال
/// ```rust
/// use tinylink::utils::generate_short_code;
///
/// let code = generate_short_code();
/// assert_eq!(code.len(), 6);
/// ```
#[must_use]
pub fn generate_short_code() -> String {
    generate_short_code_with_length(DEFAULT_SHORT_CODE_LENGTH)
}

/// تولید short code با طول مشخص
///
/// هر کاراکتر مستقل و با احتمال یکسان از `SHORT_CODE_ALPHABET` انتخاب میشه.
/// یکتا بودن اینجا تضمین نمیشه؛ `LinkStore` برخورد رو چک میکنه.
///
/// # مثال
/// ```rust
/// use tinylink::utils::generate_short_code_with_length;
///
/// let code = generate_short_code_with_length(10);
/// assert_eq!(code.len(), 10);
/// ```
#[must_use]
pub fn generate_short_code_with_length(length: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..SHORT_CODE_ALPHABET.len());
            SHORT_CODE_ALPHABET[idx] as char
        })
        .collect()
}

// =====================================
// Validation Functions
// =====================================
/// بررسی فرمت short code برای یک طول مشخص
///
/// # مثال
/// ```rust
/// use tinylink::utils::is_valid_short_code;
///
/// assert!(is_valid_short_code("abc123", 6));
/// assert!(!is_valid_short_code("abc-12", 6));
/// assert!(!is_valid_short_code("abc12", 6));
/// ```
#[must_use]
pub fn is_valid_short_code(code: &str, length: usize) -> bool {
    code.len() == length && VALID_SHORT_CODE.is_match(code)
}

/// آیا رشته بعد از حذف فاصله‌ها خالیه؟
///
/// تنها قانون «خالی» برای URL، ایمیل و رمز.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validator سفارشی برای DTO‌ها بر پایه `is_blank`
///
/// # Errors
/// `blank` اگه مقدار خالی یا فقط فاصله باشه
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// =====================================
// Logging Utilities
// =====================================
/// Mask کردن بخشی از متن (برای لاگ‌ها)
///
/// # مثال
/// ```rust
/// use tinylink::utils::mask_string;
///
/// assert_eq!(mask_string("secret123", 3), "sec***");
/// ```
#[must_use]
pub fn mask_string(text: &str, visible_chars: usize) -> String {
    let total = text.chars().count();
    if total <= visible_chars {
        return "*".repeat(total);
    }

    let visible: String = text.chars().take(visible_chars).collect();
    format!("{}***", visible)
}

/// Mask کردن بخش محلی ایمیل، دامنه دست نمیخوره
///
/// ```rust
/// use tinylink::utils::mask_email;
///
/// assert_eq!(mask_email("alice@example.com"), "al***@example.com");
/// ```
#[must_use]
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}@{}", mask_string(local, 2), domain),
        None => mask_string(email, 2),
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_has_62_distinct_symbols() {
        let unique: std::collections::HashSet<_> = SHORT_CODE_ALPHABET.iter().collect();
        assert_eq!(SHORT_CODE_ALPHABET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_short_code() {
        let code = generate_short_code();
        assert_eq!(code.len(), DEFAULT_SHORT_CODE_LENGTH);
        assert!(is_valid_short_code(&code, DEFAULT_SHORT_CODE_LENGTH));
    }

    #[test]
    fn test_generate_short_code_with_length() {
        for len in [1, 6, 12] {
            let code = generate_short_code_with_length(len);
            assert_eq!(code.len(), len);
            assert!(is_valid_short_code(&code, len));
        }
    }

    #[test]
    fn test_generated_codes_use_all_classes() {
        // با 2000 کد ۶ حرفی، نبودن یکی از سه کلاس عملا غیرممکنه
        let joined: String = (0..2000).map(|_| generate_short_code()).collect();
        assert!(joined.chars().any(|c| c.is_ascii_digit()));
        assert!(joined.chars().any(|c| c.is_ascii_lowercase()));
        assert!(joined.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_valid_short_code() {
        assert!(is_valid_short_code("abc123", 6));
        assert!(is_valid_short_code("ABCxyz", 6));
        assert!(!is_valid_short_code("ab_123", 6));
        assert!(!is_valid_short_code("abc 12", 6));
        assert!(!is_valid_short_code("", 0));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank("http://example.com"));
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("a@example.com").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t ").is_err());
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("secret123", 3), "sec***");
        assert_eq!(mask_string("ab", 5), "**");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("bob@example.com"), "bo***@example.com");
        assert_eq!(mask_email("no-at-sign"), "no***");
    }
}
