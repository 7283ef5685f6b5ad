//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소는 trait으로 추상화되어 있으며, 설정에 따라 구현체가 선택되어
//! [`AppState`](crate::core::AppState)를 통해 주입됩니다.
//!
//! | Trait | 구현체 |
//! |-------|--------|
//! | [`UserStore`](users::UserStore) | [`InMemoryUserStore`](users::InMemoryUserStore), [`MongoUserStore`](users::MongoUserStore) |
//! | [`BlacklistStore`](tokens::BlacklistStore) | [`InMemoryBlacklistStore`](tokens::InMemoryBlacklistStore), [`RedisBlacklistStore`](tokens::RedisBlacklistStore) |
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{InMemoryUserStore, UserStore};
//!
//! let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
//! let user = store.find_user_by_email("user@example.com").await?;
//! ```

pub mod tokens;
pub mod users;
