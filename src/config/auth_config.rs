//! # Authentication Configuration Module
//!
//! 세션 토큰 서명과 검증에 필요한 설정을 관리합니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! # HMAC 서명 비밀키 (없으면 서버가 시작되지 않습니다)
//! export SECRET_KEY="your-super-secret-key"
//! ```
//!
//! ## 선택 환경 변수
//!
//! ```bash
//! export JWT_ISSUER="HireMeMaybe"      # 발급자 (기본값)
//! export JWT_EXPIRATION_HOURS="24"     # 액세스 토큰 유효 시간
//! ```
//!
//! ## 초기 관리자 계정
//!
//! 관리자는 회원가입으로 만들 수 없으므로 시작 시 설정으로 생성합니다.
//! 두 값을 모두 지정해야 하며, 이미 같은 이메일의 관리자가 있으면 그대로 둡니다.
//!
//! ```bash
//! export ADMIN_EMAIL="admin@hiremember.th"
//! export ADMIN_PASSWORD="change-me-please"
//! export ADMIN_USERNAME="admin"          # 선택 (기본값: admin)
//! ```

use chrono::Duration;

use super::{ConfigError, Lookup, parse_or};

/// 토큰 발급자 기본값
pub const DEFAULT_ISSUER: &str = "HireMeMaybe";

/// 초기 관리자 사용자명 기본값
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

const MIN_ADMIN_PASSWORD_LEN: usize = 8;

/// JWT 토큰 설정
///
/// 프로세스 전체에서 하나의 비밀키를 사용하며,
/// 시작 시 한 번 읽혀 [`TokenService`](crate::services::auth::TokenService)에 주입됩니다.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC 서명 비밀키
    pub secret: String,
    /// 이 서비스가 발급하고 기대하는 `iss` 값
    pub issuer: String,
    /// 액세스 토큰 유효 시간 (시간 단위)
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// 환경 변수에서 JWT 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::Missing` - `SECRET_KEY`가 없거나 비어 있는 경우
    /// * `ConfigError::Invalid` - `JWT_EXPIRATION_HOURS`가 양의 정수가 아닌 경우
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let secret = lookup("SECRET_KEY")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let expiration_hours: i64 = parse_or(lookup, "JWT_EXPIRATION_HOURS", 24)?;
        if expiration_hours <= 0 {
            return Err(ConfigError::invalid(
                "JWT_EXPIRATION_HOURS",
                &expiration_hours.to_string(),
            ));
        }

        Ok(Self {
            secret,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
            expiration_hours,
        })
    }

    /// 액세스 토큰 유효 기간
    pub fn access_token_ttl(&self) -> Duration {
        Duration::hours(self.expiration_hours)
    }
}

// 비밀키가 로그에 남지 않도록 Debug를 직접 구현
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// 시작 시 생성할 초기 관리자 계정
#[derive(Clone)]
pub struct AdminBootstrapConfig {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl AdminBootstrapConfig {
    /// `ADMIN_EMAIL`과 `ADMIN_PASSWORD`가 모두 없으면 `None`입니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::Missing` - 둘 중 하나만 지정된 경우
    /// * `ConfigError::Invalid` - 비밀번호가 8자 미만인 경우
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Option<Self>, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let (email, password) = match (non_blank("ADMIN_EMAIL"), non_blank("ADMIN_PASSWORD")) {
            (None, None) => return Ok(None),
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("ADMIN_EMAIL")),
            (Some(email), Some(password)) => (email, password),
        };

        // 값은 오류 메시지에 남기지 않음
        if password.chars().count() < MIN_ADMIN_PASSWORD_LEN {
            return Err(ConfigError::invalid("ADMIN_PASSWORD", "<redacted>"));
        }

        Ok(Some(Self {
            email: email.trim().to_lowercase(),
            username: non_blank("ADMIN_USERNAME").unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string()),
            password,
        }))
    }
}

impl std::fmt::Debug for AdminBootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrapConfig")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
