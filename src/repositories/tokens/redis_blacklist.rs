//! Redis 기반 토큰 블랙리스트
//!
//! 여러 인스턴스가 블랙리스트를 공유하거나 재시작 후에도 유지해야 할 때 사용합니다.
//! 키는 `blacklist_token:{sha256(token) hex}`이고, 토큰의 남은 수명을 TTL로 설정하므로
//! 별도의 정리 작업이 필요 없습니다.
//!
//! 같은 토큰을 다시 등록하면 마지막 등록이 이깁니다. 이미 지난 만료 시각으로 등록하면
//! 기존 키를 삭제하여 메모리 저장소와 같은 조회 결과를 냅니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use super::BlacklistStore;
use crate::caching::redis::RedisClient;
use crate::errors::AppError;

const KEY_PREFIX: &str = "blacklist_token:";

/// 등록 요청에 대한 Redis 명령
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlacklistWrite {
    /// `SET EX` - 남은 수명(초)을 TTL로 저장
    Store { ttl_seconds: u64 },
    /// `DEL` - 이미 만료되어 기존 항목도 효력이 없음
    Remove,
}

impl BlacklistWrite {
    fn plan(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        match u64::try_from((expires_at - now).num_seconds()) {
            Ok(ttl_seconds) if ttl_seconds > 0 => BlacklistWrite::Store { ttl_seconds },
            _ => BlacklistWrite::Remove,
        }
    }
}

/// Redis 블랙리스트 저장소
#[derive(Clone)]
pub struct RedisBlacklistStore {
    redis: RedisClient,
}

impl RedisBlacklistStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    /// 토큰을 SHA-256 해시 기반 Redis 키로 변환
    ///
    /// 원본 토큰은 Redis에 저장하지 않습니다.
    pub fn blacklist_key(token: &str) -> String {
        format!("{}{:x}", KEY_PREFIX, Sha256::digest(token.as_bytes()))
    }
}

#[async_trait]
impl BlacklistStore for RedisBlacklistStore {
    async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError> {
        let key = Self::blacklist_key(token);

        self.redis.exists(&key).await.map_err(|e| {
            log::error!("블랙리스트 조회 실패: {}", e);
            AppError::RedisError(e.to_string())
        })
    }

    async fn add_to_blacklist(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        let key = Self::blacklist_key(token);

        match BlacklistWrite::plan(expires_at, Utc::now()) {
            BlacklistWrite::Store { ttl_seconds } => {
                self.redis
                    .set_with_expiry(&key, &expires_at.timestamp(), ttl_seconds)
                    .await
                    .map_err(|e| {
                        log::error!("블랙리스트 저장 실패: {}", e);
                        AppError::RedisError(e.to_string())
                    })?;
                log::debug!("블랙리스트 등록 - key: {}..., TTL: {}초", &key[..KEY_PREFIX.len() + 16], ttl_seconds);
            }
            BlacklistWrite::Remove => {
                self.redis.delete(&key).await.map_err(|e| {
                    log::error!("블랙리스트 삭제 실패: {}", e);
                    AppError::RedisError(e.to_string())
                })?;
                log::debug!("만료된 블랙리스트 등록 - key: {}... 삭제", &key[..KEY_PREFIX.len() + 16]);
            }
        }

        Ok(())
    }
}
