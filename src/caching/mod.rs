//! 캐싱 계층 모듈
//!
//! Redis 연결을 관리하며, 영속 토큰 블랙리스트
//! ([`RedisBlacklistStore`](crate::repositories::tokens::RedisBlacklistStore))의 백엔드로 사용됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new(&config.storage.redis_url).await?;
//! cache.set_with_expiry("blacklist_token:ab12...", &expires_at, 3600).await?;
//! let revoked = cache.exists("blacklist_token:ab12...").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! BLACKLIST_STORE=redis
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
