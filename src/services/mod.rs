//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소와 설정을 생성자로 주입받으며,
//! [`AppState`](crate::core::AppState)에 담겨 핸들러와 미들웨어에 전달됩니다.
//!
//! # Features
//!
//! - 토큰 발급/검증과 세션 해석 ([`auth`])
//! - 로컬 계정 등록/로그인, 프로필 조회, 제재 관리 ([`users`])
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::TokenService, users::UserService};
//!
//! let tokens = Arc::new(TokenService::new(&config.jwt));
//! let user_service = UserService::new(users, tokens.clone(), &config.password);
//! ```

pub mod users;
pub mod auth;
