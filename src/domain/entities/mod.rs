//! # Domain Entities
//!
//! 사용자 저장소에 영속되는 엔티티들입니다.
//! 제재(Punishment)는 사용자 레코드와 분리되어 저장되며,
//! 사용자당 최대 하나만 존재합니다.

pub mod users;
pub mod punishments;

pub use users::*;
pub use punishments::*;
