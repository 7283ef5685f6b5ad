use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Punishment, User};
use crate::errors::AppError;

/// 사용자/제재 저장소
///
/// 인증 미들웨어는 요청마다 이 저장소에서 사용자와 제재를 새로 읽습니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// ID로 사용자 조회
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// 이메일로 사용자 조회 (대소문자 무시)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 사용자 생성
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 사용 중인 이메일
    async fn create_user(&self, user: User) -> Result<User, AppError>;

    /// 사용자의 현재 제재 조회
    async fn find_punishment_for_user(&self, user_id: Uuid) -> Result<Option<Punishment>, AppError>;

    /// 사용자의 제재를 저장 (기존 제재는 대체됨)
    async fn save_punishment(&self, user_id: Uuid, punishment: Punishment) -> Result<(), AppError>;

    /// 사용자의 제재 삭제. 삭제된 항목이 있으면 true
    async fn delete_punishment(&self, user_id: Uuid) -> Result<bool, AppError>;
}
