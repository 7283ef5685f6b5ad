//! 전체 HTTP 파이프라인(라우트 + 미들웨어 체인 + 핸들러) 통합 테스트

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use hire_me_maybe::config::{AdminBootstrapConfig, JwtConfig, PasswordConfig, DEFAULT_ISSUER};
use hire_me_maybe::core::AppState;
use hire_me_maybe::domain::entities::{Punishment, PunishmentKind, Role, User};
use hire_me_maybe::errors::AppError;
use hire_me_maybe::handlers;
use hire_me_maybe::repositories::tokens::{BlacklistStore, InMemoryBlacklistStore};
use hire_me_maybe::repositories::users::{InMemoryUserStore, UserStore};
use hire_me_maybe::routes::configure_all_routes;

macro_rules! app {
    ($state:expr) => {{
        let state: AppState = $state.clone();
        test::init_service(App::new().configure(move |cfg| configure_all_routes(cfg, &state))).await
    }};
}

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-secret".to_string(),
        issuer: DEFAULT_ISSUER.to_string(),
        expiration_hours: 1,
    }
}

fn state_with(blacklist: Arc<dyn BlacklistStore>) -> (AppState, Arc<InMemoryUserStore>) {
    let users = Arc::new(InMemoryUserStore::new());
    let state = AppState::new(
        &jwt_config(),
        &PasswordConfig { bcrypt_cost: 4 },
        users.clone(),
        blacklist,
    );
    (state, users)
}

fn memory_state() -> (AppState, Arc<InMemoryUserStore>) {
    state_with(Arc::new(InMemoryBlacklistStore::new()))
}

async fn stored_user(users: &InMemoryUserStore, role: Role) -> User {
    users
        .create_user(User::new_local(
            format!("{}@example.com", Uuid::new_v4()),
            "stored_user".to_string(),
            "not-a-real-hash".to_string(),
            role,
        ))
        .await
        .unwrap()
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// 블랙리스트 조회는 항상 통과, 등록은 항상 실패하는 저장소
struct FailingBlacklistStore;

#[async_trait]
impl BlacklistStore for FailingBlacklistStore {
    async fn is_blacklisted(&self, _token: &str) -> Result<bool, AppError> {
        Ok(false)
    }

    async fn add_to_blacklist(&self, _token: &str, _expires_at: DateTime<Utc>) -> Result<(), AppError> {
        Err(AppError::RedisError("connection refused".to_string()))
    }
}

#[actix_web::test]
async fn test_fresh_token_reaches_profile() {
    let (state, users) = memory_state();
    let app = app!(state);
    let user = stored_user(&users, Role::Cpsk).await;

    let token = state.tokens.issue_token(user.id, Duration::hours(1), DEFAULT_ISSUER).unwrap();
    let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&token)).to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert!(body["punishment"].is_null());
}

#[actix_web::test]
async fn test_expired_token_is_rejected() {
    let (state, users) = memory_state();
    let app = app!(state);
    let user = stored_user(&users, Role::Cpsk).await;

    let token = state.tokens.issue_token(user.id, Duration::minutes(-1), DEFAULT_ISSUER).unwrap();
    let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&token)).to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Access token expired");
}

#[actix_web::test]
async fn test_logout_revokes_token() {
    let (state, users) = memory_state();
    let app = app!(state);
    let user = stored_user(&users, Role::Company).await;
    let token = state.tokens.issue_token(user.id, Duration::hours(1), DEFAULT_ISSUER).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "message": "Successfully logged out" }));

    let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&token)).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Token has been revoked");

    // 같은 토큰으로 다시 로그아웃할 수 없음
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_foreign_issuer_is_rejected() {
    let (state, users) = memory_state();
    let app = app!(state);
    let user = stored_user(&users, Role::Cpsk).await;

    let token = state.tokens.issue_token(user.id, Duration::hours(1), "other-service").unwrap();
    let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&token)).to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Invalid token issuer");
}

#[actix_web::test]
async fn test_missing_header_is_bad_request() {
    let (state, _) = memory_state();
    let app = app!(state);

    for (method, uri) in [("GET", "/api/v1/me"), ("POST", "/api/v1/auth/logout")] {
        let req = match method {
            "GET" => test::TestRequest::get(),
            _ => test::TestRequest::post(),
        }
        .uri(uri)
        .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Invalid authorization header format");
    }
}

#[actix_web::test]
async fn test_non_bearer_scheme_is_bad_request() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_logout_store_failure_is_internal_error() {
    let (state, users) = state_with(Arc::new(FailingBlacklistStore));
    let app = app!(state);
    let user = stored_user(&users, Role::Cpsk).await;
    let token = state.tokens.issue_token(user.id, Duration::hours(1), DEFAULT_ISSUER).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Failed to logout");
}

#[actix_web::test]
async fn test_logout_without_authentication_middleware_is_unauthorized() {
    let (state, users) = memory_state();
    let user = stored_user(&users, Role::Cpsk).await;
    let token = state.tokens.issue_token(user.id, Duration::hours(1), DEFAULT_ISSUER).unwrap();

    // 인증 미들웨어 없이 핸들러만 등록
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .route("/logout", web::post().to(handlers::auth::logout)),
    )
    .await;

    let req = test::TestRequest::post().uri("/logout").insert_header(bearer(&token)).to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "invalid token claims");
    assert!(!state.blacklist.is_blacklisted(&token).await.unwrap());
}

#[actix_web::test]
async fn test_register_login_and_profile() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": "Student@KU.th",
            "username": "student01",
            "password": "SecurePass123",
            "role": "cpsk"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let registered: Value = test::read_body_json(res).await;
    assert_eq!(registered["user"]["email"], "student@ku.th");
    assert_eq!(registered["user"]["role"], "cpsk");
    assert!(registered["user"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "student@ku.th", "password": "SecurePass123" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let logged_in: Value = test::read_body_json(res).await;
    let token = logged_in["token"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&token)).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let profile: Value = test::read_body_json(res).await;
    assert_eq!(profile["user"]["id"], registered["user"]["id"]);
}

#[actix_web::test]
async fn test_registration_rejects_bad_input() {
    let (state, _) = memory_state();
    let app = app!(state);

    let admin_role = json!({
        "email": "root@ku.th",
        "username": "root_user",
        "password": "SecurePass123",
        "role": "admin"
    });
    let short_password = json!({
        "email": "a@ku.th",
        "username": "student01",
        "password": "short",
        "role": "company"
    });

    for payload in [admin_role, short_password] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(payload)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert!(body["error"].is_string());
    }
}

#[actix_web::test]
async fn test_duplicate_registration_conflicts() {
    let (state, _) = memory_state();
    let app = app!(state);
    let payload = json!({
        "email": "dup@ku.th",
        "username": "dup_user",
        "password": "SecurePass123",
        "role": "company"
    });

    let req = test::TestRequest::post().uri("/api/v1/auth/register").set_json(&payload).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/api/v1/auth/register").set_json(&payload).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_wrong_password_is_unauthorized() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "nobody@ku.th", "password": "whatever" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[actix_web::test]
async fn test_visitor_cannot_reach_profile() {
    let (state, users) = memory_state();
    let app = app!(state);
    let visitor = stored_user(&users, Role::Visitor).await;
    let token = state.tokens.issue_access_token(&visitor).unwrap().access_token;

    let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&token)).to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "User doesn't have permission to access");
}

#[actix_web::test]
async fn test_admin_punishment_lifecycle() {
    let (state, users) = memory_state();
    let app = app!(state);
    let admin = stored_user(&users, Role::Admin).await;
    let target = stored_user(&users, Role::Cpsk).await;
    let admin_token = state.tokens.issue_access_token(&admin).unwrap().access_token;
    let target_token = state.tokens.issue_access_token(&target).unwrap().access_token;
    let path = format!("/api/v1/admin/users/{}/punishment", target.id);

    let req = test::TestRequest::post()
        .uri(&path)
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "type": "ban", "reason": "fake job posts" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let punishment: Value = test::read_body_json(res).await;
    assert_eq!(punishment["type"], "ban");

    let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&target_token)).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Account is banned");

    let req = test::TestRequest::delete().uri(&path).insert_header(bearer(&admin_token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&target_token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete().uri(&path).insert_header(bearer(&admin_token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_admin_routes_require_admin_role() {
    let (state, users) = memory_state();
    let app = app!(state);
    let company = stored_user(&users, Role::Company).await;
    let target = stored_user(&users, Role::Cpsk).await;
    let token = state.tokens.issue_access_token(&company).unwrap().access_token;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/users/{}/punishment", target.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "type": "ban" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_overflowing_punishment_duration_is_bad_request() {
    let (state, users) = memory_state();
    let app = app!(state);
    let admin = stored_user(&users, Role::Admin).await;
    let target = stored_user(&users, Role::Cpsk).await;
    let token = state.tokens.issue_access_token(&admin).unwrap().access_token;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/users/{}/punishment", target.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "type": "suspend", "duration_hours": 9000000000000000_i64 }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(users.find_punishment_for_user(target.id).await.unwrap(), None);
}

#[actix_web::test]
async fn test_bootstrapped_admin_can_punish() {
    let (state, users) = memory_state();
    state
        .user_service
        .ensure_admin(&AdminBootstrapConfig {
            email: "root@ku.th".to_string(),
            username: "root".to_string(),
            password: "AdminPass123".to_string(),
        })
        .await
        .unwrap();
    let target = stored_user(&users, Role::Company).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "root@ku.th", "password": "AdminPass123" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let logged_in: Value = test::read_body_json(res).await;
    let token = logged_in["token"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/users/{}/punishment", target.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "type": "ban" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_admin_cannot_punish_admin() {
    let (state, users) = memory_state();
    let app = app!(state);
    let admin = stored_user(&users, Role::Admin).await;
    let other_admin = stored_user(&users, Role::Admin).await;
    let token = state.tokens.issue_access_token(&admin).unwrap().access_token;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/users/{}/punishment", other_admin.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "type": "suspend", "duration_hours": 24 }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Cannot punish an admin");
}

#[actix_web::test]
async fn test_lapsed_suspend_is_cleared_on_access() {
    let (state, users) = memory_state();
    let app = app!(state);
    let user = stored_user(&users, Role::Company).await;
    let now = Utc::now();
    users
        .save_punishment(
            user.id,
            Punishment {
                kind: PunishmentKind::Suspend,
                reason: Some("cooling off".to_string()),
                starts_at: now - Duration::days(3),
                ends_at: Some(now - Duration::hours(1)),
            },
        )
        .await
        .unwrap();
    let token = state.tokens.issue_access_token(&user).unwrap().access_token;

    let req = test::TestRequest::get().uri("/api/v1/me").insert_header(bearer(&token)).to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert!(body["punishment"].is_null());
    assert!(users.find_punishment_for_user(user.id).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_health_check() {
    let (state, _) = memory_state();
    let app = app!(state);

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "healthy");
}
