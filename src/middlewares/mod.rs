//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인에서 인증/인가를 담당하는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. [`RequireAuthentication`]
//! - Bearer 토큰 추출 및 세션 검증
//! - 성공 시 [`AuthenticatedSession`](crate::domain::models::AuthenticatedSession)을
//!   request extension에 저장 (이 값을 기록하는 유일한 단계)
//!
//! ### 2. [`RequireRole`]
//! - 세션의 역할이 허용 목록에 있는지 검사 (관리자도 목록에 있어야 통과)
//!
//! ### 3. [`EnforcePunishment`]
//! - 지정한 종류의 유효한 제재가 있으면 403
//! - 기간이 끝난 정지 처분은 삭제 후 통과
//!
//! # 사용 방법
//!
//! ActixWeb은 마지막에 등록한 `wrap`을 가장 먼저 실행하므로,
//! 실행 순서의 역순으로 등록합니다.
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::{EnforcePunishment, RequireAuthentication, RequireRole};
//!
//! web::scope("/api/v1/me")
//!     .wrap(EnforcePunishment::new(PunishmentKind::Suspend, users.clone()))
//!     .wrap(EnforcePunishment::new(PunishmentKind::Ban, users.clone()))
//!     .wrap(RequireRole::new([Role::Cpsk, Role::Company, Role::Admin]))
//!     .wrap(RequireAuthentication::new(validator.clone()))
//!     .route("", web::get().to(me))
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod role_middleware;
pub mod punishment_middleware;

use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::ResponseError;

use crate::errors::AppError;

// 미들웨어 재export
pub use auth_middleware::RequireAuthentication;
pub use punishment_middleware::EnforcePunishment;
pub use role_middleware::RequireRole;

/// 다음 서비스를 호출하지 않고 에러 응답으로 요청을 종료합니다.
pub(crate) fn reject<B>(req: ServiceRequest, error: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = error.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 인증 단계를 거치지 않은 요청
pub(crate) fn authentication_required() -> AppError {
    AppError::AuthenticationError("Authentication required".to_string())
}
