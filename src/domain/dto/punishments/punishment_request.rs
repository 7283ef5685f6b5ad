//! 관리자 제재 요청 DTO

use chrono::Duration;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::entities::PunishmentKind;
use crate::errors::{AppError, AppResult};

/// 제재 기간 상한 (100년)
pub const MAX_DURATION_HOURS: i64 = 24 * 365 * 100;

/// `POST /api/v1/admin/users/{id}/punishment` 요청
///
/// ```json
/// { "type": "suspend", "reason": "spam", "duration_hours": 72 }
/// ```
///
/// `duration_hours`가 없으면 영구 제재이며, `suspend`는 기간이 필수입니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_suspend_has_duration"))]
pub struct PunishUserRequest {
    #[serde(rename = "type")]
    pub kind: PunishmentKind,

    #[validate(length(max = 500, message = "사유는 500자 이하여야 합니다"))]
    pub reason: Option<String>,

    #[validate(range(
        min = 1,
        max = MAX_DURATION_HOURS,
        message = "제재 기간은 1시간 이상 100년 이하여야 합니다"
    ))]
    pub duration_hours: Option<i64>,
}

impl PunishUserRequest {
    /// 제재 기간을 `Duration`으로 변환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 시간 단위 값이 표현 범위를 벗어난 경우
    pub fn duration(&self) -> AppResult<Option<Duration>> {
        self.duration_hours
            .map(|hours| {
                Duration::try_hours(hours).ok_or_else(|| {
                    AppError::ValidationError("duration_hours is out of range".to_string())
                })
            })
            .transpose()
    }
}

fn validate_suspend_has_duration(req: &PunishUserRequest) -> Result<(), ValidationError> {
    if req.kind == PunishmentKind::Suspend && req.duration_hours.is_none() {
        return Err(ValidationError::new("suspend_requires_duration")
            .with_message("suspend requires duration_hours".into()));
    }
    Ok(())
}
