//! 인메모리 사용자 저장소.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use shop_core::{NewUser, Role, StoreError, User, UserId, UserStore};
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    next_id: UserId,
}

/// 인메모리 사용자 저장소.
///
/// 이메일 유일성 검사와 삽입이 하나의 쓰기 잠금 안에서 이루어지므로
/// 동시 가입 경합에서도 하나만 성공합니다.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 수.
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let stored = User {
            id: inner.next_id,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn update_role(&self, id: UserId, role: Role) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.write().await;

        Ok(inner.users.get_mut(&id).map(|user| {
            user.role = role;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let store = InMemoryUserStore::new();

        let a = store.insert(NewUser::new("a@x.com", "h1")).await.unwrap();
        let b = store.insert(NewUser::new("b@x.com", "h2")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.role, Role::User);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(NewUser::new("a@x.com", "h1")).await.unwrap();

        let result = store.insert(NewUser::new("a@x.com", "h2")).await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail(email)) if email == "a@x.com"));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_single_winner() {
        let store = Arc::new(InMemoryUserStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(NewUser::new("race@x.com", format!("h{i}")))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_role() {
        let store = InMemoryUserStore::new();
        let user = store.insert(NewUser::new("a@x.com", "h1")).await.unwrap();

        let updated = store.update_role(user.id, Role::Admin).await.unwrap().unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert_eq!(
            store.find_by_id(user.id).await.unwrap().unwrap().role,
            Role::Admin
        );
        assert!(store.update_role(42, Role::Admin).await.unwrap().is_none());
    }
}
