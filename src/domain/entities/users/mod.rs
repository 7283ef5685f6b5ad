//! Users Entity Module
//!
//! 사용자 계정과 역할을 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{Role, User};
//!
//! let user = User::new_local(
//!     "student@ku.th".to_string(),
//!     "student".to_string(),
//!     hashed_password,
//!     Role::Cpsk,
//! );
//! assert!(!user.is_admin());
//! ```

pub mod user;

pub use user::*;
