//! # MongoDB 사용자 저장소
//!
//! ## 컬렉션
//!
//! - `users` - 사용자 문서 (`_id`: UUID 문자열, email unique 인덱스)
//! - `punishments` - 제재 문서 (`_id`: 사용자 UUID 문자열, 사용자당 하나)
//!
//! 시각은 Unix 밀리초(i64)로 저장합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserStore;
use crate::db::Database;
use crate::domain::entities::{Punishment, PunishmentKind, Role, User};
use crate::errors::AppError;

const DUPLICATE_KEY: i32 = 11000;

/// `users` 컬렉션 문서
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    email: String,
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
    role: Role,
    created_at: i64,
    updated_at: i64,
}

/// `punishments` 컬렉션 문서
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PunishmentDocument {
    #[serde(rename = "_id")]
    user_id: String,
    #[serde(rename = "type")]
    kind: PunishmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    starts_at: i64,
    ends_at: Option<i64>,
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| AppError::DatabaseError(format!("timestamp out of range: {}", ms)))
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            created_at: user.created_at.timestamp_millis(),
            updated_at: user.updated_at.timestamp_millis(),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = AppError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&document.id)
                .map_err(|e| AppError::DatabaseError(format!("invalid user id {}: {}", document.id, e)))?,
            email: document.email,
            username: document.username,
            password_hash: document.password_hash,
            role: document.role,
            created_at: from_millis(document.created_at)?,
            updated_at: from_millis(document.updated_at)?,
        })
    }
}

impl PunishmentDocument {
    fn new(user_id: Uuid, punishment: &Punishment) -> Self {
        Self {
            user_id: user_id.to_string(),
            kind: punishment.kind,
            reason: punishment.reason.clone(),
            starts_at: punishment.starts_at.timestamp_millis(),
            ends_at: punishment.ends_at.map(|t| t.timestamp_millis()),
        }
    }

    fn into_punishment(self) -> Result<Punishment, AppError> {
        Ok(Punishment {
            kind: self.kind,
            reason: self.reason,
            starts_at: from_millis(self.starts_at)?,
            ends_at: self.ends_at.map(from_millis).transpose()?,
        })
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn db_error(e: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(e.to_string())
}

/// MongoDB 사용자 저장소
#[derive(Clone)]
pub struct MongoUserStore {
    users: Collection<UserDocument>,
    punishments: Collection<PunishmentDocument>,
}

impl MongoUserStore {
    /// 컬렉션 핸들을 준비하고 인덱스를 생성합니다.
    pub async fn new(database: &Database) -> Result<Self, AppError> {
        let db = database.get_database();
        let store = Self {
            users: db.collection("users"),
            punishments: db.collection("punishments"),
        };

        store.create_indexes().await?;
        Ok(store)
    }

    /// 이메일 유니크 인덱스 생성
    async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        self.users
            .create_index(email_index)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.users
            .find_one(doc! { "_id": id.to_string() })
            .await
            .map_err(db_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users
            .find_one(doc! { "email": email.to_lowercase() })
            .await
            .map_err(db_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn create_user(&self, user: User) -> Result<User, AppError> {
        let mut document = UserDocument::from(&user);
        document.email = document.email.to_lowercase();

        self.users.insert_one(&document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError("Email already registered".to_string())
            } else {
                db_error(e)
            }
        })?;

        log::info!("사용자 생성 완료 - ID: {}", user.id);
        Ok(user)
    }

    async fn find_punishment_for_user(&self, user_id: Uuid) -> Result<Option<Punishment>, AppError> {
        self.punishments
            .find_one(doc! { "_id": user_id.to_string() })
            .await
            .map_err(db_error)?
            .map(PunishmentDocument::into_punishment)
            .transpose()
    }

    async fn save_punishment(&self, user_id: Uuid, punishment: Punishment) -> Result<(), AppError> {
        let document = PunishmentDocument::new(user_id, &punishment);

        self.punishments
            .replace_one(doc! { "_id": user_id.to_string() }, &document)
            .upsert(true)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn delete_punishment(&self, user_id: Uuid) -> Result<bool, AppError> {
        let result = self
            .punishments
            .delete_one(doc! { "_id": user_id.to_string() })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }
}
