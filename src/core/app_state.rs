//! 애플리케이션 공유 상태
//!
//! 서버 시작 시 한 번 조립되어 모든 워커에 복제됩니다.
//! 토큰 비밀키, 발급자, 저장소는 모두 여기서 주입되며
//! 요청 처리 중에 환경 변수를 다시 읽지 않습니다.

use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::config::{AppConfig, BlacklistBackend, JwtConfig, PasswordConfig, UserStoreBackend};
use crate::db::Database;
use crate::errors::AppError;
use crate::repositories::tokens::{BlacklistStore, InMemoryBlacklistStore, RedisBlacklistStore};
use crate::repositories::users::{InMemoryUserStore, MongoUserStore, UserStore};
use crate::services::auth::{SessionValidator, TokenService};
use crate::services::users::UserService;

/// 핸들러와 미들웨어가 공유하는 의존성 묶음
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub validator: Arc<SessionValidator>,
    pub users: Arc<dyn UserStore>,
    pub blacklist: Arc<dyn BlacklistStore>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// 이미 만들어진 저장소로 상태를 조립합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let state = AppState::new(
    ///     &config.jwt,
    ///     &config.password,
    ///     Arc::new(InMemoryUserStore::new()),
    ///     Arc::new(InMemoryBlacklistStore::new()),
    /// );
    /// ```
    pub fn new(
        jwt: &JwtConfig,
        password: &PasswordConfig,
        users: Arc<dyn UserStore>,
        blacklist: Arc<dyn BlacklistStore>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(jwt));
        let validator = Arc::new(SessionValidator::new(
            tokens.clone(),
            blacklist.clone(),
            users.clone(),
        ));
        let user_service = Arc::new(UserService::new(users.clone(), tokens.clone(), password));

        Self {
            tokens,
            validator,
            users,
            blacklist,
            user_service,
        }
    }

    /// 설정에 따라 저장소 백엔드를 연결하고 상태를 조립합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - MongoDB 연결 또는 인덱스 생성 실패
    /// * `AppError::RedisError` - Redis 연결 실패
    /// * `AppError::ConflictError` - 초기 관리자 이메일이 일반 계정에 사용 중
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let users = connect_user_store(config).await?;
        let blacklist = connect_blacklist_store(config).await?;

        let state = Self::new(&config.jwt, &config.password, users, blacklist);
        match &config.admin {
            Some(admin) => {
                state.user_service.ensure_admin(admin).await?;
            }
            None => log::warn!("⚠️ ADMIN_EMAIL/ADMIN_PASSWORD 미설정 - 관리자 계정이 생성되지 않습니다"),
        }

        Ok(state)
    }
}

async fn connect_user_store(config: &AppConfig) -> Result<Arc<dyn UserStore>, AppError> {
    match config.storage.user_store {
        UserStoreBackend::Memory => {
            log::warn!("⚠️ 메모리 사용자 저장소 사용 중 - 재시작 시 데이터가 사라집니다");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
        UserStoreBackend::MongoDb => {
            let database = Database::new(&config.storage.mongodb_uri, &config.storage.database_name)
                .await
                .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?;
            let store = MongoUserStore::new(&database).await?;
            log::info!("✅ MongoDB 사용자 저장소 연결: {}", config.storage.database_name);
            Ok(Arc::new(store))
        }
    }
}

async fn connect_blacklist_store(config: &AppConfig) -> Result<Arc<dyn BlacklistStore>, AppError> {
    match config.storage.blacklist_store {
        BlacklistBackend::Memory => {
            let interval = config.storage.blacklist_sweep_interval;
            log::info!("메모리 블랙리스트 사용 - 정리 주기: {:?}", interval);
            Ok(Arc::new(InMemoryBlacklistStore::with_sweeper(interval)))
        }
        BlacklistBackend::Redis => {
            let client = RedisClient::new(&config.storage.redis_url)
                .await
                .map_err(|e| AppError::RedisError(format!("Redis 연결 실패: {}", e)))?;
            Ok(Arc::new(RedisBlacklistStore::new(client)))
        }
    }
}
