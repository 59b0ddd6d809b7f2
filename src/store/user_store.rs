//! # User Store
//!
//! جدول کاربران در حافظه. یکتا بودن ایمیل موقع درج و زیر قفل چک میشه.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::{
    error::{AppError, Result},
    models::{User, UserId},
};

#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

/// Store کاربران
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    table: Arc<RwLock<UserTable>>,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// درج کاربر جدید
    ///
    /// # Errors
    /// `DuplicateEmail` اگه ایمیل قبلا ثبت شده باشه؛ رکورد موجود دست نمیخوره
    pub async fn insert(&self, user: User) -> Result<User> {
        let mut table = self.table.write().await;

        if table.by_email.contains_key(&user.email) {
            return Err(AppError::DuplicateEmail(user.email));
        }

        table.by_email.insert(user.email.clone(), user.id.clone());
        table.users.insert(user.id.clone(), user.clone());

        info!(user_id = %user.id, "Stored user");
        Ok(user)
    }

    /// پیدا کردن با شناسه
    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.table.read().await.users.get(id).cloned()
    }

    /// پیدا کردن با ایمیل (دقیقا همون رشته، بدون تغییر حروف)
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let table = self.table.read().await;
        table
            .by_email
            .get(email)
            .and_then(|id| table.users.get(id))
            .cloned()
    }

    /// آیا کاربری با این شناسه هست؟
    pub async fn exists(&self, id: &str) -> bool {
        self.table.read().await.users.contains_key(id)
    }

    /// آیا این ایمیل ثبت شده؟
    pub async fn email_exists(&self, email: &str) -> bool {
        self.table.read().await.by_email.contains_key(email)
    }

    /// تعداد کاربران
    pub async fn count(&self) -> usize {
        self.table.read().await.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, email: &str, hash: &str) -> User {
        User {
            id: UserId::from(id),
            email: email.to_string(),
            password_hash: hash.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = UserStore::new();
        store.insert(user("U1", "a@example.com", "h1")).await.unwrap();

        assert!(store.exists("U1").await);
        assert!(!store.exists("U2").await);
        assert_eq!(store.find_by_email("a@example.com").await.unwrap().id, UserId::from("U1"));
        assert_eq!(store.find_by_id("U1").await.unwrap().email, "a@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_keeps_original() {
        let store = UserStore::new();
        store.insert(user("U1", "a@example.com", "h1")).await.unwrap();

        let result = store.insert(user("U2", "a@example.com", "h2")).await;
        assert!(matches!(result, Err(AppError::DuplicateEmail(_))));

        let existing = store.find_by_email("a@example.com").await.unwrap();
        assert_eq!(existing.id, UserId::from("U1"));
        assert_eq!(existing.password_hash, "h1");
        assert!(!store.exists("U2").await);
        assert_eq!(store.count().await, 1);
    }
}
