//! HireMeMaybe 인증/세션 백엔드
//!
//! 학생(CPSK), 기업, 관리자를 연결하는 채용 게시판의 인증 계층입니다.
//! HMAC JWT 발급과 검증, 블랙리스트 기반 토큰 폐기,
//! 역할과 제재(ban/suspend)를 고려한 인가 미들웨어를 제공합니다.
//!
//! # Features
//!
//! - **토큰**: HS256 서명, 발급자/만료 검증
//! - **폐기**: 메모리(주기적 정리) 또는 Redis 블랙리스트
//! - **인가**: 인증 → 역할 → 제재 순서의 미들웨어 체인
//! - **계정**: 로컬 회원가입/로그인 (bcrypt), 관리자 제재 관리
//! - **저장소**: 메모리 또는 MongoDB 사용자 저장소
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 미들웨어 체인 구성
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Middlewares   │ ← RequireAuthentication / RequireRole / EnforcePunishment
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenService, SessionValidator, UserService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore, BlacklistStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Memory / MongoDB│
//! │    / Redis      │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use hire_me_maybe::config::AppConfig;
//! use hire_me_maybe::core::AppState;
//! use hire_me_maybe::routes::configure_all_routes;
//!
//! let config = AppConfig::from_env()?;
//! let state = AppState::from_config(&config).await?;
//! let app = App::new().configure(|cfg| configure_all_routes(cfg, &state));
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
