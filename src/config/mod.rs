//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수는 `main`에서 한 번만 읽어 [`AppConfig`]로 만들고,
//! 이후에는 생성자 인자로 각 컴포넌트에 주입합니다.
//! 비즈니스 로직은 환경 변수를 직접 읽지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 저장소, 패스워드, Rate Limiting, CORS 설정
//! - [`auth_config`] - 토큰 서명/발급 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use hire_me_maybe::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("Server will bind to {}", config.server.bind_address());
//! ```
//!
//! 테스트에서는 [`AppConfig::from_lookup`]에 클로저를 넘겨
//! 프로세스 환경을 건드리지 않고 설정을 구성합니다.

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;

use std::str::FromStr;

use thiserror::Error;

/// 설정 키로 값을 조회하는 함수
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// 시작 시점의 설정 오류
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 필수 값 누락
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    /// 값 파싱 실패
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

impl ConfigError {
    pub fn invalid(var: &'static str, value: &str) -> Self {
        ConfigError::Invalid {
            var,
            value: value.to_string(),
        }
    }
}

/// 값이 없으면 기본값을, 있으면 파싱 결과를 반환합니다.
pub(crate) fn parse_or<T: FromStr>(
    lookup: Lookup<'_>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::invalid(var, &raw)),
    }
}

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub storage: StorageConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    /// 초기 관리자 계정 (`ADMIN_EMAIL`, `ADMIN_PASSWORD`)
    pub admin: Option<AdminBootstrapConfig>,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// 임의의 키-값 조회 함수로 설정을 구성합니다.
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(lookup);
        let password = PasswordConfig::from_lookup(lookup, &environment);

        Ok(Self {
            server: ServerConfig::from_lookup(lookup)?,
            jwt: JwtConfig::from_lookup(lookup)?,
            password,
            storage: StorageConfig::from_lookup(lookup)?,
            rate_limit: RateLimitConfig::from_lookup(lookup)?,
            cors: CorsConfig::from_lookup(lookup),
            admin: AdminBootstrapConfig::from_lookup(lookup)?,
            environment,
        })
    }
}
