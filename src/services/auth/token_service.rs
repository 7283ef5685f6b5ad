//! 세션 토큰 코덱 구현
//!
//! HMAC 서명 JWT의 발급과 서명 검증을 담당합니다.
//! 만료와 발급자 검사는 [`SessionValidator`](super::SessionValidator)가
//! 정해진 순서에 따라 수행하므로, 이 코덱은 서명과 형식만 검증합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::domain::entities::User;
use crate::domain::models::{IssuedToken, TokenClaims};
use crate::errors::{AppError, ErrorContext};

/// 토큰 디코딩 실패
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    /// 구조가 잘못되었거나 클레임을 해석할 수 없음
    #[error("malformed token: {0}")]
    Malformed(String),

    /// 서명 불일치
    #[error("signature verification failed")]
    InvalidSignature,

    /// HMAC 계열이 아닌 서명 알고리즘
    #[error("unexpected signing method: {0}")]
    UnexpectedAlgorithm(String),
}

/// JWT 토큰 코덱
///
/// 프로세스 전체에서 하나의 비밀키를 사용하며, 생성 시 주입받습니다.
/// HS256으로 서명하고, 검증 시에는 HMAC 계열(HS256/HS384/HS512)만 허용합니다.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_token_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            access_token_ttl: config.access_token_ttl(),
        }
    }

    /// 이 서비스가 발급하고 기대하는 발급자
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// 서명된 토큰 발급
    ///
    /// # Arguments
    ///
    /// * `subject` - 토큰 주체 (사용자 ID)
    /// * `duration` - 유효 기간. 음수도 허용되며 이미 만료된 토큰이 만들어집니다.
    /// * `issuer` - `iss` 클레임 값
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.issue_token(user.id, Duration::hours(1), "HireMeMaybe")?;
    /// ```
    pub fn issue_token(
        &self,
        subject: Uuid,
        duration: Duration,
        issuer: &str,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = TokenClaims {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + duration).timestamp(),
        };

        self.sign(&claims)
    }

    /// 설정된 발급자와 유효 기간으로 액세스 토큰 발급
    pub fn issue_access_token(&self, user: &User) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + self.access_token_ttl;
        let claims = TokenClaims {
            iss: self.issuer.clone(),
            sub: user.id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let access_token = self.sign(&claims)?;
        log::debug!("액세스 토큰 발급 - 사용자: {}", user.id);

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_ttl.num_seconds(),
            expires_at,
        })
    }

    /// 서명 검증 및 클레임 추출
    ///
    /// 만료와 발급자는 검사하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidSignature` - 다른 키로 서명되었거나 내용이 변조됨
    /// * `TokenError::UnexpectedAlgorithm` - HMAC 계열이 아닌 알고리즘
    /// * `TokenError::Malformed` - 그 외 해석 불가능한 토큰
    pub fn parse_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName
                | ErrorKind::InvalidKeyFormat => TokenError::UnexpectedAlgorithm(e.to_string()),
                _ => TokenError::Malformed(e.to_string()),
            })
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).context("JWT 토큰 생성 실패")
    }
}

/// Bearer 토큰에서 실제 토큰 부분 추출
///
/// `"Bearer {token}"` 형식이 아니거나 토큰 부분이 비어 있으면 `None`입니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
/// assert_eq!(extract_bearer_token("Basic dXNlcg=="), None);
/// ```
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let token = auth_header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
