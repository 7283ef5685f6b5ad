//! 제재 검사 규칙
//!
//! `EnforcePunishment` 미들웨어가 부수 효과(저장소 삭제, 응답 생성)를
//! 수행하기 전에 무엇을 해야 하는지만 결정합니다.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Punishment, PunishmentKind};
use crate::domain::models::Identity;

/// 제재 검사 결과
#[derive(Debug, Clone, PartialEq)]
pub enum PunishmentVerdict {
    /// 통과
    Proceed,
    /// 기간이 끝난 정지 처분을 삭제한 뒤 통과
    ClearAndProceed,
    /// 유효한 제재로 차단
    Deny(Punishment),
}

/// 주체의 제재 상태를 `kind` 기준으로 평가합니다.
///
/// - 관리자는 항상 통과
/// - 해당 종류의 제재가 없거나 아직 시작되지 않았으면 통과
/// - 종료된 `suspend`는 삭제 대상, 종료된 `ban`은 삭제하지 않고 통과
/// - 그 외에는 차단
pub fn evaluate_punishment(
    identity: &Identity,
    kind: PunishmentKind,
    now: DateTime<Utc>,
) -> PunishmentVerdict {
    if identity.is_admin() {
        return PunishmentVerdict::Proceed;
    }

    let Some(punishment) = identity.punishment_of(kind) else {
        return PunishmentVerdict::Proceed;
    };

    if !punishment.has_started(now) {
        return PunishmentVerdict::Proceed;
    }

    if punishment.has_lapsed(now) {
        return match kind {
            PunishmentKind::Suspend => PunishmentVerdict::ClearAndProceed,
            PunishmentKind::Ban => PunishmentVerdict::Proceed,
        };
    }

    PunishmentVerdict::Deny(punishment.clone())
}
