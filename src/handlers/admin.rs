//! 관리자 전용 제재 관리 핸들러
//!
//! `RequireAuthentication` → `RequireRole(admin)` 뒤에서만 호출됩니다.

use actix_web::{delete, post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::PunishUserRequest;
use crate::domain::models::AuthenticatedSession;
use crate::errors::AppError;

fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("User not found".to_string()))
}

/// 사용자에게 제재 부여 (기존 제재는 대체)
///
/// # Endpoint
/// `POST /api/v1/admin/users/{id}/punishment`
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/admin/users/{id}/punishment \
///   -H "Authorization: Bearer ..." \
///   -H "Content-Type: application/json" \
///   -d '{"type":"suspend","reason":"spam","duration_hours":72}'
/// ```
#[post("/users/{id}/punishment")]
pub async fn punish_user(
    state: web::Data<AppState>,
    session: AuthenticatedSession,
    path: web::Path<String>,
    payload: web::Json<PunishUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let target_id = parse_user_id(&path)?;
    let punishment = state
        .user_service
        .punish_user(session.identity.id, target_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(punishment))
}

/// 사용자 제재 해제
///
/// # Endpoint
/// `DELETE /api/v1/admin/users/{id}/punishment`
#[delete("/users/{id}/punishment")]
pub async fn clear_punishment(
    state: web::Data<AppState>,
    session: AuthenticatedSession,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let target_id = parse_user_id(&path)?;
    state
        .user_service
        .clear_punishment(session.identity.id, target_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
