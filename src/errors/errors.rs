//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 실패를
//! `{"error": "<message>"}` 형식의 JSON 응답으로 변환합니다.
//!
//! ## 상태 코드 매핑
//!
//! | AppError | HTTP Status |
//! |----------|-------------|
//! | `ValidationError`, `BadRequest` | 400 |
//! | `AuthenticationError` | 401 |
//! | `AuthorizationError` | 403 |
//! | `NotFound` | 404 |
//! | `ConflictError` | 409 |
//! | `DatabaseError`, `RedisError`, `InternalError` | 500 |
//!
//! 데이터베이스/Redis 에러의 상세 내용은 로그에만 남기고
//! 클라이언트에는 일반 메시지만 반환합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! let user = store.find_user_by_id(id).await?
//!     .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 형식이 잘못된 요청 (400 Bad Request)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    ///
    /// 메시지는 그대로 클라이언트에 전달되므로 사용자에게 보여줄 문구만 담습니다.
    /// 라이브러리 오류의 세부 내용은 [`ErrorContext`]로 로그에만 남깁니다.
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// 세부 원인을 숨긴 5xx 응답 메시지
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

impl AppError {
    /// 응답 본문의 `error` 필드에 들어갈 메시지
    pub fn client_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::RedisError(_) => {
                GENERIC_INTERNAL_MESSAGE.to_string()
            }
            AppError::ValidationError(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::InternalError(msg) => msg.clone(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 원인을 서버 로그에 기록합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": self.client_message()
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 원인을 로그에 기록하고 일반 내부 오류로 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| {
            log::error!("{}: {}", msg, e);
            AppError::InternalError(GENERIC_INTERNAL_MESSAGE.to_string())
        })
    }
}
