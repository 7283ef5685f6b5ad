//! 인메모리 토큰 블랙리스트
//!
//! 단일 프로세스 배포용 블랙리스트입니다. 읽기는 공유 잠금, 추가와 정리는
//! 배타 잠금을 사용합니다. 정리 태스크는 저장소가 소유하며,
//! [`stop_sweeper`](InMemoryBlacklistStore::stop_sweeper) 호출 또는 drop 시 중단됩니다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::BlacklistStore;
use crate::errors::AppError;

type Entries = Arc<RwLock<HashMap<String, DateTime<Utc>>>>;

/// 정리 태스크 기본 주기
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// 인메모리 블랙리스트 저장소
pub struct InMemoryBlacklistStore {
    entries: Entries,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl InMemoryBlacklistStore {
    /// 정리 태스크 없이 생성합니다. 필요하면 [`sweep`](Self::sweep)을 직접 호출합니다.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            sweeper: Mutex::new(None),
        }
    }

    /// 생성과 동시에 `interval`마다 만료 항목을 제거하는 태스크를 시작합니다.
    ///
    /// Tokio 런타임 안에서 호출해야 합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let store = InMemoryBlacklistStore::with_sweeper(config.storage.blacklist_sweep_interval);
    /// ```
    pub fn with_sweeper(interval: Duration) -> Self {
        let entries: Entries = Arc::new(RwLock::new(HashMap::new()));
        let handle = spawn_sweeper(Arc::clone(&entries), interval);

        Self {
            entries,
            sweeper: Mutex::new(Some(handle)),
        }
    }

    /// 정리 태스크를 중단합니다. 여러 번 호출해도 안전합니다.
    pub fn stop_sweeper(&self) {
        if let Ok(mut guard) = self.sweeper.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
                log::debug!("블랙리스트 정리 태스크 중단");
            }
        }
    }

    /// 정리 태스크가 실행 중인지 확인
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .map(|guard| guard.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }

    /// 만료된 항목을 한 번 정리하고 제거된 개수를 반환합니다.
    pub async fn sweep(&self) -> usize {
        sweep_entries(&self.entries, Utc::now()).await
    }

    /// 물리적으로 저장된 항목 수 (만료되었지만 아직 정리되지 않은 항목 포함)
    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for InMemoryBlacklistStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InMemoryBlacklistStore {
    fn drop(&mut self) {
        self.stop_sweeper();
    }
}

#[async_trait]
impl BlacklistStore for InMemoryBlacklistStore {
    async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(token)
            .is_some_and(|expires_at| *expires_at > Utc::now()))
    }

    async fn add_to_blacklist(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        self.entries
            .write()
            .await
            .insert(token.to_string(), expires_at);
        Ok(())
    }
}

async fn sweep_entries(entries: &RwLock<HashMap<String, DateTime<Utc>>>, now: DateTime<Utc>) -> usize {
    let mut entries = entries.write().await;
    let before = entries.len();
    entries.retain(|_, expires_at| *expires_at > now);
    before - entries.len()
}

fn spawn_sweeper(entries: Entries, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 첫 tick은 즉시 완료됨
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = sweep_entries(&entries, Utc::now()).await;
            if removed > 0 {
                log::debug!("🧹 만료된 블랙리스트 토큰 {}개 정리", removed);
            }
        }
    })
}
