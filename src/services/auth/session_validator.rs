//! 세션 검증 서비스
//!
//! `Authorization` 헤더 하나로부터 [`AuthenticatedSession`]을 만들어내거나,
//! 실패 원인을 [`AuthFailure`]로 반환합니다.
//!
//! ## 검사 순서
//!
//! 여러 조건이 동시에 실패하면 먼저 검사한 원인이 보고됩니다.
//!
//! ```text
//! 1. 헤더 누락 / "Bearer " 아님 / 토큰 비어 있음  → MalformedHeader
//! 2. 서명·알고리즘·형식 오류                      → InvalidToken
//! 3. exp <= now                                   → Expired
//! 4. iss 불일치                                   → InvalidIssuer
//! 5. 블랙리스트 등록                              → Revoked
//! 6. sub가 UUID가 아니거나 사용자 없음            → UnknownSubject
//! 7. 제재 조회 후 세션 반환
//! ```

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::token_service::{extract_bearer_token, TokenService};
use crate::domain::models::{AuthenticatedSession, Identity};
use crate::errors::AppError;
use crate::repositories::tokens::BlacklistStore;
use crate::repositories::users::UserStore;

/// 세션 검증 실패 원인
#[derive(Error, Debug)]
pub enum AuthFailure {
    #[error("Invalid authorization header format")]
    MalformedHeader,

    #[error("Failed to validate token: {0}")]
    InvalidToken(String),

    #[error("Access token expired")]
    Expired,

    #[error("Invalid token issuer")]
    InvalidIssuer,

    #[error("Token has been revoked")]
    Revoked,

    #[error("User not exist")]
    UnknownSubject,

    /// 블랙리스트 또는 사용자 저장소 오류
    #[error(transparent)]
    Store(#[from] AppError),
}

/// HTTP 응답 매핑
///
/// | AuthFailure | Status |
/// |-------------|--------|
/// | `MalformedHeader` | 400 |
/// | `InvalidToken`, `Expired`, `InvalidIssuer`, `Revoked`, `UnknownSubject` | 401 |
/// | `Store` | 원래 에러의 상태 코드 (보통 500) |
impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::MalformedHeader => {
                AppError::BadRequest(AuthFailure::MalformedHeader.to_string())
            }
            AuthFailure::Store(inner) => inner,
            other => AppError::AuthenticationError(other.to_string()),
        }
    }
}

/// 세션 검증기
///
/// 코덱, 블랙리스트, 사용자 저장소를 생성 시 주입받습니다.
#[derive(Clone)]
pub struct SessionValidator {
    tokens: Arc<TokenService>,
    blacklist: Arc<dyn BlacklistStore>,
    users: Arc<dyn UserStore>,
}

impl SessionValidator {
    pub fn new(
        tokens: Arc<TokenService>,
        blacklist: Arc<dyn BlacklistStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            tokens,
            blacklist,
            users,
        }
    }

    /// `Authorization` 헤더 값을 검증합니다.
    ///
    /// # Arguments
    ///
    /// * `authorization_header` - 헤더 값. 헤더가 없으면 `None`
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticatedSession)` - 주체, 클레임, 원본 토큰
    ///
    /// # Errors
    ///
    /// 모듈 문서의 검사 순서대로 첫 번째 실패 원인을 반환합니다.
    pub async fn validate(
        &self,
        authorization_header: Option<&str>,
    ) -> Result<AuthenticatedSession, AuthFailure> {
        let token = authorization_header
            .and_then(extract_bearer_token)
            .ok_or(AuthFailure::MalformedHeader)?;

        let claims = self
            .tokens
            .parse_token(token)
            .map_err(|e| AuthFailure::InvalidToken(e.to_string()))?;

        if claims.is_expired_at(Utc::now()) {
            return Err(AuthFailure::Expired);
        }

        if claims.iss != self.tokens.issuer() {
            return Err(AuthFailure::InvalidIssuer);
        }

        if self.blacklist.is_blacklisted(token).await? {
            return Err(AuthFailure::Revoked);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthFailure::UnknownSubject)?;
        let user = self
            .users
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthFailure::UnknownSubject)?;

        let punishment = self.users.find_punishment_for_user(user.id).await?;

        Ok(AuthenticatedSession {
            identity: Identity {
                id: user.id,
                role: user.role,
                punishment,
            },
            claims,
            token: token.to_string(),
        })
    }
}
