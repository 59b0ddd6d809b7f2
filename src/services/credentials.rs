//! # Credential Verification
//!
//! الگوریتم hash رمز عبور از دید بقیه کتابخانه opaque هست؛ هر چیزی که
//! `CredentialVerifier` رو پیاده کنه قابل جایگزینیه. پیش‌فرض Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{Result, ResultExt};

// =====================================
// CredentialVerifier Trait
// =====================================
/// ساخت و بررسی hash رمز عبور
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier {
    /// hash کردن رمز خام
    ///
    /// # Errors
    /// `Internal` اگه hashing شکست بخوره
    fn hash(&self, plain_password: &str) -> Result<String>;

    /// آیا رمز خام با hash ذخیره شده میخونه؟
    ///
    /// # Errors
    /// `Internal` اگه hash ذخیره شده خراب باشه
    fn verify(&self, plain_password: &str, stored_hash: &str) -> Result<bool>;
}

// =====================================
// Argon2 Implementation
// =====================================
/// پیاده‌سازی با Argon2id
///
/// # مفاهیم:
/// - Salt تصادفی برای هر رمز با `OsRng`
/// - پارامترها داخل خود hash ذخیره میشن، پس `verify` به `params` نیازی نداره
#[derive(Debug, Clone)]
pub struct Argon2Verifier {
    params: Params,
}

impl Default for Argon2Verifier {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2Verifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ساخت با پارامترهای دلخواه (مثلا ارزون برای تست)
    ///
    /// # Errors
    /// `Internal` اگه پارامترها خارج از محدوده مجاز Argon2 باشن
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None).map_internal()?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn hash(&self, plain_password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(plain_password.as_bytes(), &salt)?
            .to_string();

        Ok(hash)
    }

    fn verify(&self, plain_password: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)?;

        Ok(self
            .argon2()
            .verify_password(plain_password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Verifier {
        Argon2Verifier::with_params(8, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let verifier = cheap();
        let hash = verifier.hash("hunter2").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verifier.verify("hunter2", &hash).unwrap());
        assert!(!verifier.verify("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let verifier = cheap();
        assert_ne!(verifier.hash("pw").unwrap(), verifier.hash("pw").unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(cheap().verify("pw", "not-a-hash").is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(Argon2Verifier::with_params(0, 0, 0).is_err());
    }
}
