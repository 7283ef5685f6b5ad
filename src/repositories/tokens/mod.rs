//! 토큰 블랙리스트 저장소
//!
//! 로그아웃된 토큰을 원래 만료 시각까지 보관하여 재사용을 막습니다.
//!
//! | 구현 | 백엔드 | 만료 항목 정리 |
//! |------|--------|----------------|
//! | [`InMemoryBlacklistStore`] | 프로세스 메모리 | 주기적 sweep 태스크 |
//! | [`RedisBlacklistStore`] | Redis | 키 TTL |

pub mod blacklist_store;
pub mod memory_blacklist;
pub mod redis_blacklist;

pub use blacklist_store::*;
pub use memory_blacklist::*;
pub use redis_blacklist::*;
