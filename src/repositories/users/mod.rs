//! 사용자 및 제재 저장소
//!
//! 제재는 사용자 레코드와 분리되어 저장되며 사용자당 최대 하나입니다.

pub mod user_store;
pub mod memory_user_store;
pub mod mongo_user_store;

pub use user_store::*;
pub use memory_user_store::*;
pub use mongo_user_store::*;
