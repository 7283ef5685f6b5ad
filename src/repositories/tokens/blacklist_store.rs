use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;

/// 무효화된 토큰 저장소
///
/// 키는 요청에 사용된 원본 토큰 문자열이며, 값은 토큰의 원래 만료 시각입니다.
/// 만료 시각이 지난 항목은 논리적으로 존재하지 않는 것으로 취급합니다.
#[async_trait]
pub trait BlacklistStore: Send + Sync {
    /// 토큰이 블랙리스트에 있는지 확인
    async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError>;

    /// 토큰을 만료 시각과 함께 블랙리스트에 추가 (같은 토큰은 마지막 쓰기가 유지됨)
    async fn add_to_blacklist(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), AppError>;
}
