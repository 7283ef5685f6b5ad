//! # Data Transfer Objects
//!
//! API 요청/응답 계약을 정의합니다.
//!
//! ## 요청 처리 흐름
//!
//! ```text
//! JSON body ──► serde 역직렬화 ──► validator 검증 ──► 서비스 호출
//!                                     │
//!                                     └─ 실패 시 400 {"error": "..."}
//! ```
//!
//! - [`users`] - 회원가입, 로그인, 프로필 응답
//! - [`punishments`] - 관리자 제재 요청

pub mod users;
pub mod punishments;

pub use users::*;
pub use punishments::*;
