//! 세션 토큰 클레임과 발급 결과
//!
//! RFC 7519 표준 클레임 네 개만 사용합니다.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `iss`: 토큰 발급자
/// - `sub`: 토큰의 주체 (사용자 UUID 문자열)
/// - `iat`: 토큰 발급 시간 (Unix timestamp, 초)
/// - `exp`: 토큰 만료 시간 (Unix timestamp, 초)
///
/// 발급 이후 변경되지 않으며, `exp`에 도달하거나 블랙리스트에 등록되면 무효입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    /// `now` 기준으로 만료되었는지 확인 (`exp <= now`)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// 만료 시각
    ///
    /// 표현 범위를 벗어난 `exp`는 `DateTime`의 최솟값으로 취급합니다.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// 클라이언트에게 전달되는 액세스 토큰
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// 항상 `"Bearer"`
    pub token_type: String,
    /// 만료까지 남은 시간 (초)
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims_expiring_at(exp: i64) -> TokenClaims {
        TokenClaims {
            iss: "HireMeMaybe".to_string(),
            sub: "subject".to_string(),
            iat: 0,
            exp,
        }
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        assert!(claims_expiring_at(now.timestamp()).is_expired_at(now));
        assert!(claims_expiring_at(now.timestamp() - 1).is_expired_at(now));
        assert!(!claims_expiring_at((now + Duration::seconds(5)).timestamp()).is_expired_at(now));
    }

    #[test]
    fn test_expires_at_matches_exp() {
        let claims = claims_expiring_at(1_700_000_000);
        assert_eq!(claims.expires_at().timestamp(), 1_700_000_000);
    }
}
