//! # 회원가입 / 로그인 요청 DTO
//!
//! ## 검증 규칙
//!
//! ### 이메일 (`email`)
//! - RFC 5322 표준 이메일 형식 준수
//! - 중복 여부는 사용자 저장소에서 별도 검증 (409)
//!
//! ### 사용자명 (`username`)
//! - 길이: 3-30자
//! - 허용 문자: 영문, 숫자, 언더스코어(_)
//!
//! ### 비밀번호 (`password`)
//! - 최소 길이: 8자
//!
//! ### 역할 (`role`)
//! - 가입 시에는 `cpsk` 또는 `company`만 선택 가능

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::entities::Role;

/// 회원가입 요청 DTO
///
/// # JSON 예제
///
/// ```json
/// {
///   "email": "student@ku.th",
///   "username": "student_01",
///   "password": "SecurePass123",
///   "role": "cpsk"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(
        min = 3,
        max = 30,
        message = "사용자명은 3-30자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(
        min = 8,
        message = "비밀번호는 최소 8자 이상이어야 합니다"
    ))]
    pub password: String,

    #[validate(custom(function = "validate_registrable_role"))]
    pub role: Role,
}

/// 로컬 로그인 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 사용자명 문자 제약 검증 (영문, 숫자, 언더스코어)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 영문, 숫자, 언더스코어만 사용할 수 있습니다".into()));
    }
    Ok(())
}

/// 가입 가능한 역할인지 검증
///
/// `admin`과 `visitor`는 가입 요청으로 선택할 수 없습니다.
fn validate_registrable_role(role: &Role) -> Result<(), ValidationError> {
    match role {
        Role::Cpsk | Role::Company => Ok(()),
        _ => Err(ValidationError::new("invalid_role")
            .with_message("role must be either cpsk or company".into())),
    }
}
