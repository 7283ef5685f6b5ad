//! Authentication HTTP Handlers
//!
//! 로컬 계정 등록/로그인과 로그아웃(토큰 폐기)을 처리합니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/auth/register` - 회원가입 (201)
//! - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인
//! - `POST /api/v1/auth/logout` - 현재 토큰 폐기 (`RequireAuthentication` 필요)

use actix_web::{http::header, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::{LoginRequest, RegisterRequest};
use crate::domain::models::OptionalSession;
use crate::errors::AppError;
use crate::services::auth::{extract_bearer_token, AuthFailure};

/// 회원가입 핸들러
///
/// `cpsk` 또는 `company` 역할로만 가입할 수 있습니다.
///
/// # Endpoint
/// `POST /api/v1/auth/register`
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/register \
///   -H "Content-Type: application/json" \
///   -d '{"email":"student@ku.th","username":"student01","password":"SecurePass123","role":"cpsk"}'
/// ```
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = state.user_service.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = state.user_service.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 로그아웃 핸들러
///
/// 요청에 사용된 토큰을 만료 시각까지 블랙리스트에 등록합니다.
/// 라우트에서 `RequireAuthentication` 뒤에 등록해야 합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/logout`
///
/// # Errors
///
/// * 400 - Bearer 토큰 없음
/// * 401 `"invalid token claims"` - 인증 단계의 세션이 없음
/// * 500 `"Failed to logout"` - 블랙리스트 저장 실패
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: OptionalSession,
) -> Result<HttpResponse, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or(AuthFailure::MalformedHeader)?;

    let OptionalSession(Some(session)) = session else {
        return Err(AppError::AuthenticationError("invalid token claims".to_string()));
    };

    state
        .blacklist
        .add_to_blacklist(token, session.claims.expires_at())
        .await
        .map_err(|e| {
            log::error!("로그아웃 실패 - 사용자 ID: {}: {}", session.identity.id, e);
            AppError::InternalError("Failed to logout".to_string())
        })?;

    log::info!("로그아웃 - 사용자 ID: {}", session.identity.id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully logged out" })))
}
