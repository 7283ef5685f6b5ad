//! 제재(ban/suspend) 검사 미들웨어

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;

use crate::domain::entities::PunishmentKind;
use crate::domain::models::AuthenticatedSession;
use crate::errors::AppError;
use crate::middlewares::{authentication_required, reject};
use crate::repositories::users::UserStore;
use crate::services::auth::{evaluate_punishment, PunishmentVerdict};

/// 지정한 종류의 유효한 제재가 있는 주체를 차단합니다.
///
/// 기간이 끝난 정지 처분은 저장소에서 삭제한 뒤 통과시키고,
/// 요청 세션의 제재 정보도 함께 비웁니다. 삭제에 실패해도 요청은 계속 진행됩니다.
pub struct EnforcePunishment {
    kind: PunishmentKind,
    users: Arc<dyn UserStore>,
}

impl EnforcePunishment {
    pub fn new(kind: PunishmentKind, users: Arc<dyn UserStore>) -> Self {
        Self { kind, users }
    }
}

impl<S, B> Transform<S, ServiceRequest> for EnforcePunishment
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = EnforcePunishmentService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(EnforcePunishmentService {
            service: Rc::new(service),
            kind: self.kind,
            users: self.users.clone(),
        }))
    }
}

pub struct EnforcePunishmentService<S> {
    service: Rc<S>,
    kind: PunishmentKind,
    users: Arc<dyn UserStore>,
}

impl<S, B> Service<ServiceRequest> for EnforcePunishmentService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let users = self.users.clone();
        let kind = self.kind;

        Box::pin(async move {
            let identity = req
                .extensions()
                .get::<AuthenticatedSession>()
                .map(|session| session.identity.clone());

            let Some(identity) = identity else {
                return Ok(reject(req, authentication_required()));
            };

            match evaluate_punishment(&identity, kind, Utc::now()) {
                PunishmentVerdict::Proceed => {}
                PunishmentVerdict::ClearAndProceed => {
                    match users.delete_punishment(identity.id).await {
                        Ok(_) => log::info!("만료된 {} 처분 삭제 - 사용자 ID: {}", kind, identity.id),
                        Err(e) => log::warn!("만료된 {} 처분 삭제 실패 - 사용자 ID: {}: {}", kind, identity.id, e),
                    }
                    if let Some(session) = req.extensions_mut().get_mut::<AuthenticatedSession>() {
                        session.identity.punishment = None;
                    }
                }
                PunishmentVerdict::Deny(punishment) => {
                    log::warn!(
                        "🚫 제재 중인 사용자 차단 - ID: {}, 종류: {}, 종료: {:?}",
                        identity.id,
                        punishment.kind,
                        punishment.ends_at
                    );
                    return Ok(reject(
                        req,
                        AppError::AuthorizationError(kind.denial_message().to_string()),
                    ));
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use chrono::Duration;
    use uuid::Uuid;

    use crate::domain::entities::{Punishment, Role, User};
    use crate::domain::models::{Identity, OptionalSession, TokenClaims};
    use crate::repositories::users::InMemoryUserStore;

    fn session(id: Uuid, role: Role, punishment: Option<Punishment>) -> AuthenticatedSession {
        AuthenticatedSession {
            identity: Identity { id, role, punishment },
            claims: TokenClaims {
                iss: "HireMeMaybe".to_string(),
                sub: id.to_string(),
                iat: 0,
                exp: i64::MAX,
            },
            token: "t".to_string(),
        }
    }

    fn punishment(kind: PunishmentKind, started_hours_ago: i64, ends_in_hours: Option<i64>) -> Punishment {
        let now = Utc::now();
        Punishment {
            kind,
            reason: None,
            starts_at: now - Duration::hours(started_hours_ago),
            ends_at: ends_in_hours.map(|h| now + Duration::hours(h)),
        }
    }

    async fn has_punishment(session: OptionalSession) -> HttpResponse {
        let punished = session.0.and_then(|s| s.identity.punishment).is_some();
        HttpResponse::Ok().body(punished.to_string())
    }

    async fn stored_user(users: &InMemoryUserStore, role: Role) -> User {
        users
            .create_user(User::new_local(
                format!("{}@example.com", Uuid::new_v4()),
                "someone".to_string(),
                "hash".to_string(),
                role,
            ))
            .await
            .unwrap()
    }

    macro_rules! app_for {
        ($users:expr, $kind:expr, $session:expr) => {{
            let session = $session;
            test::init_service(
                App::new()
                    .wrap(EnforcePunishment::new($kind, $users.clone()))
                    .wrap_fn(move |req, srv| {
                        if let Some(s) = session.clone() {
                            req.extensions_mut().insert(s);
                        }
                        srv.call(req)
                    })
                    .route("/", web::get().to(has_punishment)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_active_ban_is_forbidden() {
        let users = Arc::new(InMemoryUserStore::new());
        let user = stored_user(&users, Role::Cpsk).await;
        let ban = punishment(PunishmentKind::Ban, 1, None);
        let app = app_for!(users, PunishmentKind::Ban, Some(session(user.id, Role::Cpsk, Some(ban))));

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let json: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(json["error"], "Account is banned");
    }

    #[actix_web::test]
    async fn test_active_suspend_is_forbidden() {
        let users = Arc::new(InMemoryUserStore::new());
        let user = stored_user(&users, Role::Company).await;
        let suspend = punishment(PunishmentKind::Suspend, 1, Some(5));
        let app = app_for!(users, PunishmentKind::Suspend, Some(session(user.id, Role::Company, Some(suspend))));

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let json: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(json["error"], "Account is suspended");
    }

    #[actix_web::test]
    async fn test_other_kind_is_ignored() {
        let users = Arc::new(InMemoryUserStore::new());
        let user = stored_user(&users, Role::Cpsk).await;
        let suspend = punishment(PunishmentKind::Suspend, 1, Some(5));
        let app = app_for!(users, PunishmentKind::Ban, Some(session(user.id, Role::Cpsk, Some(suspend))));

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_lapsed_suspend_is_cleared() {
        let users = Arc::new(InMemoryUserStore::new());
        let user = stored_user(&users, Role::Cpsk).await;
        let lapsed = punishment(PunishmentKind::Suspend, 10, Some(-1));
        users.save_punishment(user.id, lapsed.clone()).await.unwrap();

        let app = app_for!(users, PunishmentKind::Suspend, Some(session(user.id, Role::Cpsk, Some(lapsed))));
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "false");
        assert!(users.find_punishment_for_user(user.id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_lapsed_ban_is_kept() {
        let users = Arc::new(InMemoryUserStore::new());
        let user = stored_user(&users, Role::Cpsk).await;
        let lapsed = punishment(PunishmentKind::Ban, 10, Some(-1));
        users.save_punishment(user.id, lapsed.clone()).await.unwrap();

        let app = app_for!(users, PunishmentKind::Ban, Some(session(user.id, Role::Cpsk, Some(lapsed))));
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(users.find_punishment_for_user(user.id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_admin_is_exempt() {
        let users = Arc::new(InMemoryUserStore::new());
        let admin = stored_user(&users, Role::Admin).await;
        let ban = punishment(PunishmentKind::Ban, 1, None);
        let app = app_for!(users, PunishmentKind::Ban, Some(session(admin.id, Role::Admin, Some(ban))));

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_session_is_unauthorized() {
        let users = Arc::new(InMemoryUserStore::new());
        let app = app_for!(users, PunishmentKind::Ban, None::<AuthenticatedSession>);

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
