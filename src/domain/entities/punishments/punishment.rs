//! Punishment Entity Implementation

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// 제재 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunishmentKind {
    /// 영구 또는 기간 제한 전면 차단
    Ban,
    /// 종료 시각 이후 자동 해제되는 기간 차단
    Suspend,
}

impl PunishmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunishmentKind::Ban => "ban",
            PunishmentKind::Suspend => "suspend",
        }
    }

    /// 차단 시 응답 메시지
    pub fn denial_message(&self) -> &'static str {
        match self {
            PunishmentKind::Ban => "Account is banned",
            PunishmentKind::Suspend => "Account is suspended",
        }
    }
}

impl fmt::Display for PunishmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PunishmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ban" => Ok(PunishmentKind::Ban),
            "suspend" => Ok(PunishmentKind::Suspend),
            other => Err(format!("unknown punishment type: {}", other)),
        }
    }
}

/// 사용자 제재
///
/// `ends_at`이 `None`이면 영구 제재입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Punishment {
    #[serde(rename = "type")]
    pub kind: PunishmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl Punishment {
    /// 지금부터 시작하는 제재를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `kind` - 제재 종류
    /// * `reason` - 제재 사유
    /// * `duration` - 제재 기간. `None`이면 영구
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 종료 시각이 표현 범위를 벗어난 경우
    pub fn starting_now(
        kind: PunishmentKind,
        reason: Option<String>,
        duration: Option<Duration>,
    ) -> AppResult<Self> {
        let starts_at = Utc::now();
        let ends_at = duration
            .map(|d| {
                starts_at.checked_add_signed(d).ok_or_else(|| {
                    AppError::ValidationError("punishment end time is out of range".to_string())
                })
            })
            .transpose()?;

        Ok(Self { kind, reason, starts_at, ends_at })
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }

    /// 종료 시각이 지났는지 확인 (영구 제재는 항상 false)
    pub fn has_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.ends_at.is_some_and(|ends_at| ends_at <= now)
    }
}
