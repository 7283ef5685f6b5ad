//! User Entity Implementation
//!
//! 사용자 엔티티와 역할(Role) 정의입니다.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 사용자 역할
///
/// 닫힌 집합이며, 지정되지 않은 경우 `Visitor`입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 학생 사용자
    Cpsk,
    /// 기업 사용자
    Company,
    /// 관리자
    Admin,
    /// 역할 미선택 사용자
    #[default]
    Visitor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Cpsk => "cpsk",
            Role::Company => "company",
            Role::Admin => "admin",
            Role::Visitor => "visitor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpsk" => Ok(Role::Cpsk),
            "company" => Ok(Role::Company),
            "admin" => Ok(Role::Admin),
            "visitor" => Ok(Role::Visitor),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// 사용자 엔티티
///
/// `id`는 토큰의 `sub` 클레임으로 사용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// 사용자 이메일 (unique)
    pub email: String,
    pub username: String,
    /// 해시된 비밀번호 (외부 인증 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/패스워드)
    pub fn new_local(email: String, username: String, password_hash: String, role: Role) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            username,
            password_hash: Some(password_hash),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
