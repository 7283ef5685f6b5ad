//! 데이터 및 서버 설정 관리 모듈
//!
//! 서버 바인딩, 저장소 백엔드, 패스워드 해싱, Rate Limiting 설정을 관리합니다.
//! 모든 값은 시작 시 한 번 읽혀 [`AppConfig`](super::AppConfig)로 주입됩니다.

use std::time::Duration;

use super::{ConfigError, Lookup, parse_or};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 값에서 실행 환경을 결정합니다.
    ///
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        lookup("ENVIRONMENT")
            .map(|value| Self::from_name(&value))
            .unwrap_or(Environment::Production)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 환경 이름 문자열 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// 해당하는 Environment 값. 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// bcrypt cost (4-15)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// `BCRYPT_COST`가 유효 범위(4-15)이면 그 값을, 아니면 환경 기본값을 사용합니다.
    pub fn from_lookup(lookup: Lookup<'_>, env: &Environment) -> Self {
        let bcrypt_cost = lookup("BCRYPT_COST")
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(env));

        Self { bcrypt_cost }
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10
    /// - Production: 12
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(lookup, "PORT", 8080)?,
            workers: parse_or(lookup, "SERVER_WORKERS", 4)?,
        })
    }

    /// `host:port` 형식의 바인딩 주소
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 사용자 저장소 백엔드
#[derive(Debug, Clone, PartialEq)]
pub enum UserStoreBackend {
    Memory,
    MongoDb,
}

/// 토큰 블랙리스트 백엔드
#[derive(Debug, Clone, PartialEq)]
pub enum BlacklistBackend {
    Memory,
    Redis,
}

/// 저장소 설정
///
/// # Environment Variables
///
/// * `USER_STORE` - `memory` (기본값) 또는 `mongodb`
/// * `BLACKLIST_STORE` - `memory` (기본값) 또는 `redis`
/// * `MONGODB_URI`, `DATABASE_NAME` - MongoDB 연결 정보
/// * `REDIS_URL` - Redis 연결 정보
/// * `BLACKLIST_SWEEP_INTERVAL_SECS` - 인메모리 블랙리스트 정리 주기 (기본값: 300)
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub user_store: UserStoreBackend,
    pub blacklist_store: BlacklistBackend,
    pub mongodb_uri: String,
    pub database_name: String,
    pub redis_url: String,
    pub blacklist_sweep_interval: Duration,
}

impl StorageConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let user_store = match lookup("USER_STORE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("memory") => UserStoreBackend::Memory,
            Some("mongodb") | Some("mongo") => UserStoreBackend::MongoDb,
            Some(other) => return Err(ConfigError::invalid("USER_STORE", other)),
        };

        let blacklist_store = match lookup("BLACKLIST_STORE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("memory") => BlacklistBackend::Memory,
            Some("redis") => BlacklistBackend::Redis,
            Some(other) => return Err(ConfigError::invalid("BLACKLIST_STORE", other)),
        };

        let sweep_secs: u64 = parse_or(lookup, "BLACKLIST_SWEEP_INTERVAL_SECS", 300)?;
        if sweep_secs == 0 {
            return Err(ConfigError::invalid("BLACKLIST_SWEEP_INTERVAL_SECS", "0"));
        }

        Ok(Self {
            user_store,
            blacklist_store,
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "hire_me_maybe".to_string()),
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| "redis://localhost:6379".to_string()),
            blacklist_sweep_interval: Duration::from_secs(sweep_secs),
        })
    }
}

/// Rate Limiting 설정 (actix-governor)
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            per_second: parse_or(lookup, "RATE_LIMIT_PER_SECOND", 100)?,
            burst_size: parse_or(lookup, "RATE_LIMIT_BURST_SIZE", 200)?,
        })
    }
}

/// CORS 허용 Origin 목록
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// `CORS_ALLOWED_ORIGINS`를 콤마로 분리하여 읽습니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let raw = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let allowed_origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Self { allowed_origins }
    }
}
