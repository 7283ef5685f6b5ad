//! 인메모리 사용자 저장소
//!
//! 개발 환경과 테스트에서 사용합니다. 프로세스 재시작 시 데이터가 사라집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserStore;
use crate::domain::entities::{Punishment, User};
use crate::errors::AppError;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
    punishments: RwLock<HashMap<Uuid, Punishment>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_user(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AppError::ConflictError("Email already registered".to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_punishment_for_user(&self, user_id: Uuid) -> Result<Option<Punishment>, AppError> {
        Ok(self.punishments.read().await.get(&user_id).cloned())
    }

    async fn save_punishment(&self, user_id: Uuid, punishment: Punishment) -> Result<(), AppError> {
        self.punishments.write().await.insert(user_id, punishment);
        Ok(())
    }

    async fn delete_punishment(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self.punishments.write().await.remove(&user_id).is_some())
    }
}
