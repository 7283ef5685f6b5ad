//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈로, 인증/세션 수명주기에서 사용하는
//! 핵심 타입들을 정의합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 저장소에 영속되는 객체 (User, Punishment)
//! ├── DTOs      - API 요청/응답 계약
//! └── Models    - 요청 단위로 파생되는 값 (TokenClaims, AuthenticatedSession)
//!      │
//!      ▼
//! Application Layer (Services, Middlewares)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, Redis, MongoDB)
//! ```
//!
//! ## 모듈 구성
//!
//! ### [`entities`]
//!
//! - [`User`](entities::users::User) - 계정 정보와 역할
//! - [`Role`](entities::users::Role) - `cpsk`, `company`, `admin`, `visitor`
//! - [`Punishment`](entities::punishments::Punishment) - 사용자당 최대 하나의 제재(ban/suspend)
//!
//! ### [`models`]
//!
//! - [`TokenClaims`](models::token::TokenClaims) - `{iss, sub, iat, exp}`
//! - [`Identity`](models::auth::Identity) - 요청마다 해석되는 주체 정보
//! - [`AuthenticatedSession`](models::auth::AuthenticatedSession) - 인증 미들웨어만 기록하는 요청 컨텍스트
//!
//! ### [`dto`]
//!
//! 회원가입, 로그인, 제재 요청과 그 응답 형식입니다.
//! 요청 DTO는 `validator`로 입력을 검증합니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
