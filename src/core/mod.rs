//! # Core Module
//!
//! 애플리케이션 조립을 담당합니다.
//!
//! 전역 싱글톤 대신 [`AppState`]에 모든 의존성을 명시적으로 담아
//! `web::Data`로 각 워커에 전달합니다.
//!
//! ```text
//! AppConfig ──▶ AppState::from_config
//!                 ├─ UserStore       (memory | mongodb)
//!                 ├─ BlacklistStore  (memory + sweeper | redis)
//!                 ├─ TokenService
//!                 ├─ SessionValidator
//!                 └─ UserService
//! ```

pub mod app_state;

pub use app_state::AppState;
