//! # Access Guard
//!
//! همه قوانین دسترسی یکجا: فقط مالک میتونه لینک رو ببینه، ویرایش یا حذف
//! کنه، و فقط کاربر واقعا وارد شده میتونه لینک بسازه.
//!
//! `can_view` و `can_mutate` توابع pure هستن و هیچ داده‌ای نگه نمیدارن.
//! `require_authenticated` تنها جایی هست که به جدول کاربران نگاه میکنه:
//! session‌ای که به کاربری اشاره کنه که دیگه وجود نداره (مثلا بعد از
//! ری‌استارت) وارد نشده حساب میشه، نه خطا.
//!
//! مسیر redirect عمدا از این بررسی‌ها رد نمیشه.

use tracing::warn;

use crate::{
    error::{AppError, Result},
    models::{Caller, Link, UserId},
    store::UserStore,
};

/// ارزیابی‌کننده قوانین دسترسی
#[derive(Debug, Clone)]
pub struct AccessGuard {
    users: UserStore,
}

impl AccessGuard {
    #[must_use]
    pub fn new(users: UserStore) -> Self {
        Self { users }
    }

    /// فقط مالک میتونه ببینه؛ ناشناس هیچوقت
    #[must_use]
    pub fn can_view(caller: &Caller, link: &Link) -> bool {
        caller.user_id().is_some_and(|id| link.is_owned_by(id))
    }

    /// همون قانون `can_view`
    #[must_use]
    pub fn can_mutate(caller: &Caller, link: &Link) -> bool {
        Self::can_view(caller, link)
    }

    /// # Errors
    /// `Forbidden` اگه caller مالک نباشه
    pub fn ensure_can_view(caller: &Caller, link: &Link) -> Result<()> {
        if Self::can_view(caller, link) {
            return Ok(());
        }
        warn!(caller = %caller, short_code = %link.short_code, "View denied");
        Err(AppError::not_owner(link.short_code.as_str()))
    }

    /// # Errors
    /// `Forbidden` اگه caller مالک نباشه
    pub fn ensure_can_mutate(caller: &Caller, link: &Link) -> Result<()> {
        if Self::can_mutate(caller, link) {
            return Ok(());
        }
        warn!(caller = %caller, short_code = %link.short_code, "Mutation denied");
        Err(AppError::not_owner(link.short_code.as_str()))
    }

    /// آیا caller الان یک کاربر موجود هست؟
    pub async fn require_authenticated(&self, caller: &Caller) -> bool {
        match caller.user_id() {
            Some(id) => self.users.exists(id.as_str()).await,
            None => false,
        }
    }

    /// مثل `require_authenticated` ولی شناسه رو برمیگردونه
    ///
    /// # Errors
    /// `Unauthenticated` برای ناشناس یا کاربر ناموجود
    pub async fn authenticate(&self, caller: &Caller) -> Result<UserId> {
        match caller.user_id() {
            Some(id) if self.users.exists(id.as_str()).await => Ok(id.clone()),
            _ => Err(AppError::login_required()),
        }
    }

    /// تبدیل شناسه session بیرونی به `Caller`
    ///
    /// شناسه خالی یا ناموجود `Anonymous` میشه.
    pub async fn resolve(&self, session_user_id: Option<&str>) -> Caller {
        match session_user_id {
            Some(id) if !id.is_empty() && self.users.exists(id).await => Caller::user(id),
            _ => Caller::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShortCode, User};
    use chrono::Utc;

    fn link_owned_by(owner: &str) -> Link {
        Link::new(ShortCode::from("abc123"), "http://example.com", UserId::from(owner), Utc::now())
    }

    async fn guard_with(ids: &[&str]) -> AccessGuard {
        let users = UserStore::new();
        for id in ids {
            users
                .insert(User {
                    id: UserId::from(*id),
                    email: format!("{}@example.com", id),
                    password_hash: "hash".to_string(),
                })
                .await
                .unwrap();
        }
        AccessGuard::new(users)
    }

    #[test]
    fn test_only_owner_can_view_and_mutate() {
        let link = link_owned_by("U1");

        assert!(AccessGuard::can_view(&Caller::user("U1"), &link));
        assert!(AccessGuard::can_mutate(&Caller::user("U1"), &link));

        assert!(!AccessGuard::can_view(&Caller::user("U2"), &link));
        assert!(!AccessGuard::can_mutate(&Caller::user("U2"), &link));
        assert!(!AccessGuard::can_view(&Caller::Anonymous, &link));
        assert!(!AccessGuard::can_mutate(&Caller::Anonymous, &link));
    }

    #[test]
    fn test_ensure_returns_forbidden() {
        let link = link_owned_by("U1");
        assert!(AccessGuard::ensure_can_view(&Caller::user("U1"), &link).is_ok());
        assert!(matches!(
            AccessGuard::ensure_can_mutate(&Caller::user("U2"), &link),
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_require_authenticated() {
        let guard = guard_with(&["U1"]).await;

        assert!(guard.require_authenticated(&Caller::user("U1")).await);
        assert!(!guard.require_authenticated(&Caller::user("ghost")).await);
        assert!(!guard.require_authenticated(&Caller::Anonymous).await);
    }

    #[tokio::test]
    async fn test_authenticate_maps_to_unauthenticated() {
        let guard = guard_with(&["U1"]).await;

        assert_eq!(guard.authenticate(&Caller::user("U1")).await.unwrap(), UserId::from("U1"));
        assert!(matches!(
            guard.authenticate(&Caller::user("ghost")).await,
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_downgrades_unknown_users() {
        let guard = guard_with(&["U1"]).await;

        assert_eq!(guard.resolve(Some("U1")).await, Caller::user("U1"));
        assert_eq!(guard.resolve(Some("ghost")).await, Caller::Anonymous);
        assert_eq!(guard.resolve(Some("")).await, Caller::Anonymous);
        assert_eq!(guard.resolve(None).await, Caller::Anonymous);
    }
}
