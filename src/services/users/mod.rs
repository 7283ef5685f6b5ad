//! 사용자 관리 서비스 모듈
//!
//! 로컬 계정 등록/로그인, 프로필 조회, 관리자 제재 관리를 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱
//! - 이메일 중복 방지
//! - 입력값 검증 (핸들러에서 `validator` 사용)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::new(users, tokens, &config.password);
//! let response = user_service.register(request).await?;
//! ```

pub mod user_service;

pub use user_service::*;
