//! # 사용자 서비스 구현
//!
//! 로컬 계정 등록/로그인과 관리자 제재 관리를 담당합니다.
//!
//! ## 보안 고려사항
//!
//! - **bcrypt 해싱**: 환경별 cost 설정 (`BCRYPT_COST`)
//! - **계정 열거 방지**: 이메일 미존재와 비밀번호 불일치에 같은 메시지 사용
//! - **관리자 보호**: 관리자 계정에는 제재를 부여할 수 없음

use std::sync::Arc;

use bcrypt::hash;
use uuid::Uuid;

use crate::config::{AdminBootstrapConfig, PasswordConfig};
use crate::domain::dto::{AuthResponse, LoginRequest, ProfileResponse, PunishUserRequest, RegisterRequest};
use crate::domain::entities::{Punishment, Role, User};
use crate::domain::models::Identity;
use crate::errors::{AppError, ErrorContext};
use crate::repositories::users::UserStore;
use crate::services::auth::TokenService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// 사용자 비즈니스 로직 서비스
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>, password: &PasswordConfig) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost: password.bcrypt_cost,
        }
    }

    /// 새 로컬 계정을 생성하고 액세스 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 사용 중인 이메일
    /// * `AppError::InternalError` - 해싱 또는 토큰 서명 실패
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        let start_time = std::time::Instant::now();

        let password_hash = hash(&request.password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", start_time.elapsed());

        let user = User::new_local(
            request.email.trim().to_lowercase(),
            request.username,
            password_hash,
            request.role,
        );
        let user = self.users.create_user(user).await?;
        let token = self.tokens.issue_access_token(&user)?;

        log::info!("✅ 회원가입 완료 - ID: {}, 역할: {}", user.id, user.role);

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// 이메일/비밀번호로 로그인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 이메일이 없거나 비밀번호 불일치
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let user = self.verify_password(&request.email, &request.password).await?;
        let token = self.tokens.issue_access_token(&user)?;

        log::info!("로컬 로그인 성공 - ID: {}", user.id);

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    async fn verify_password(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .users
            .find_user_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        // 외부 인증 계정은 비밀번호 인증 불가
        let Some(password_hash) = user.password_hash.as_deref() else {
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        };

        let is_valid = bcrypt::verify(password, password_hash).context("비밀번호 검증 실패")?;
        if !is_valid {
            log::warn!("로그인 실패 - 비밀번호 불일치 (ID: {})", user.id);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    /// 인증된 주체의 프로필을 조회합니다.
    pub async fn profile(&self, identity: &Identity) -> Result<ProfileResponse, AppError> {
        let user = self
            .users
            .find_user_by_id(identity.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(ProfileResponse {
            user: user.into(),
            punishment: identity.punishment.clone(),
        })
    }

    /// 설정된 초기 관리자 계정이 없으면 생성합니다.
    ///
    /// 같은 이메일의 관리자가 이미 있으면 비밀번호를 바꾸지 않고 그대로 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 같은 이메일이 관리자가 아닌 계정에 사용 중
    /// * `AppError::InternalError` - 해싱 실패
    pub async fn ensure_admin(&self, admin: &AdminBootstrapConfig) -> Result<User, AppError> {
        if let Some(existing) = self.users.find_user_by_email(&admin.email).await? {
            if !existing.is_admin() {
                log::error!("초기 관리자 이메일이 일반 계정에 사용 중 - ID: {}", existing.id);
                return Err(AppError::ConflictError(
                    "Admin email is already used by a non-admin account".to_string(),
                ));
            }
            log::info!("초기 관리자 계정 확인 - ID: {}", existing.id);
            return Ok(existing);
        }

        let password_hash = hash(&admin.password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;
        let user = self
            .users
            .create_user(User::new_local(
                admin.email.clone(),
                admin.username.clone(),
                password_hash,
                Role::Admin,
            ))
            .await?;

        log::info!("👑 초기 관리자 계정 생성 - ID: {}", user.id);
        Ok(user)
    }

    /// 사용자에게 제재를 부여합니다. 기존 제재는 대체됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 대상 사용자가 없음
    /// * `AppError::BadRequest` - 대상이 관리자
    /// * `AppError::ValidationError` - 제재 기간이 표현 범위를 벗어남
    pub async fn punish_user(
        &self,
        admin_id: Uuid,
        target_id: Uuid,
        request: PunishUserRequest,
    ) -> Result<Punishment, AppError> {
        let target = self.find_target(target_id).await?;
        if target.is_admin() {
            return Err(AppError::BadRequest("Cannot punish an admin".to_string()));
        }

        let duration = request.duration()?;
        let punishment = Punishment::starting_now(request.kind, request.reason, duration)?;
        self.users.save_punishment(target.id, punishment.clone()).await?;

        log::warn!(
            "🚫 제재 부여 - 대상: {}, 종류: {}, 관리자: {}",
            target.id,
            punishment.kind,
            admin_id
        );
        Ok(punishment)
    }

    /// 사용자의 제재를 해제합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 대상 사용자 또는 제재가 없음
    pub async fn clear_punishment(&self, admin_id: Uuid, target_id: Uuid) -> Result<(), AppError> {
        let target = self.find_target(target_id).await?;

        if !self.users.delete_punishment(target.id).await? {
            return Err(AppError::NotFound("Punishment not found".to_string()));
        }

        log::info!("제재 해제 - 대상: {}, 관리자: {}", target.id, admin_id);
        Ok(())
    }

    async fn find_target(&self, target_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_user_by_id(target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
