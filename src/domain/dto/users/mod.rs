//! 사용자 관련 DTO
//!
//! 요청 DTO는 `validator::Validate`를 구현하며, 핸들러에서
//! `payload.validate()` 결과를 [`AppError::ValidationError`](crate::errors::AppError)로 변환합니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
