//! 인증 및 세션 서비스 모듈
//!
//! HMAC 서명 JWT의 발급/검증과 요청 단위 세션 해석을 담당합니다.
//!
//! # Features
//!
//! - 토큰 발급 및 서명 검증 ([`TokenService`])
//! - 정해진 순서의 세션 검증 ([`SessionValidator`])
//! - 제재 검사 규칙 ([`evaluate_punishment`])
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명, 검증 시 HMAC 계열만 허용
//! - 로그아웃된 토큰은 만료 시각까지 블랙리스트에 보관
//! - 토큰 원문은 로그에 기록하지 않음
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{SessionValidator, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(&config.jwt));
//! let issued = tokens.issue_access_token(&user)?;
//!
//! let validator = SessionValidator::new(tokens, blacklist, users);
//! let session = validator.validate(Some("Bearer eyJ...")).await?;
//! ```

pub mod token_service;
pub mod session_validator;
pub mod punishment_policy;

pub use token_service::*;
pub use session_validator::*;
pub use punishment_policy::*;
