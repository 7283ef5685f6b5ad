use std::fmt;
use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{Punishment, PunishmentKind, Role};
use crate::domain::models::token::TokenClaims;
use crate::errors::AppError;

/// 요청마다 사용자 저장소에서 새로 읽어 해석한 주체 정보
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    /// 사용자 고유 ID
    pub id: Uuid,

    /// 사용자 역할
    pub role: Role,

    /// 현재 부여된 제재 (사용자당 최대 하나)
    pub punishment: Option<Punishment>,
}

impl Identity {
    /// 관리자 여부 (관리자는 제재 검사 대상이 아닙니다)
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 허용된 역할 목록에 포함되는지 확인
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// 특정 종류의 제재 조회
    pub fn punishment_of(&self, kind: PunishmentKind) -> Option<&Punishment> {
        self.punishment.as_ref().filter(|p| p.kind == kind)
    }
}

/// 인증 미들웨어가 요청 extensions에 기록하는 컨텍스트 값
///
/// `RequireAuthentication`만 이 값을 기록하며, 이후 단계의 미들웨어와
/// 핸들러는 extractor로 읽기만 합니다.
#[derive(Clone)]
pub struct AuthenticatedSession {
    pub identity: Identity,
    pub claims: TokenClaims,
    /// 요청에 사용된 원본 토큰 (로그아웃 시 블랙리스트 키)
    pub token: String,
}

// 토큰 원문은 로그에 남기지 않음
impl fmt::Debug for AuthenticatedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedSession")
            .field("identity", &self.identity)
            .field("claims", &self.claims)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 세션이 없으면 401 "Authentication required"를 반환합니다.
impl FromRequest for AuthenticatedSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedSession>() {
            Some(session) => ready(Ok(session.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Authentication required".to_string(),
            ))),
        }
    }
}

/// 선택적 세션 추출자
#[derive(Debug, Clone)]
pub struct OptionalSession(pub Option<AuthenticatedSession>);

impl FromRequest for OptionalSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let session = req.extensions().get::<AuthenticatedSession>().cloned();
        ready(Ok(OptionalSession(session)))
    }
}
