//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 서비스 호출로 연결하는 얇은 계층입니다.
//! 의존성은 `web::Data<AppState>`로 주입받고, 인증된 주체는
//! [`AuthenticatedSession`](crate::domain::models::AuthenticatedSession) 추출자로 읽습니다.
//!
//! ```text
//! Client ──▶ Middlewares (인증/역할/제재) ──▶ Handlers ──▶ Services ──▶ Repositories
//! ```
//!
//! ## 모듈 구성
//! - **`auth`**: 회원가입, 로그인, 로그아웃
//! - **`users`**: 현재 사용자 프로필
//! - **`admin`**: 제재 부여/해제
//!
//! 요청 본문 검증은 `validator` 크레이트로 수행하며, 실패 시
//! `AppError::ValidationError`(400)로 변환합니다.

pub mod admin;
pub mod auth;
pub mod users;
