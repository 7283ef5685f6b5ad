//! # Domain Models
//!
//! 저장되지 않고 요청 단위로 파생되는 값들입니다.
//!
//! - [`token`] - 토큰 클레임과 발급 결과
//! - [`auth`] - 해석된 주체([`Identity`](auth::Identity))와
//!   요청 컨텍스트([`AuthenticatedSession`](auth::AuthenticatedSession))

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
