//! Punishment Entity Module
//!
//! 관리자가 사용자에게 부여하는 제재(ban/suspend)입니다.

pub mod punishment;

pub use punishment::*;
