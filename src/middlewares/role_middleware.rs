//! 역할 기반 접근 제어 미들웨어
//!
//! [`RequireAuthentication`](super::RequireAuthentication) 뒤에서 실행되어야 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::domain::entities::Role;
use crate::domain::models::AuthenticatedSession;
use crate::errors::AppError;
use crate::middlewares::{authentication_required, reject};

/// 허용된 역할만 통과시키는 미들웨어
///
/// 소속 검사는 엄격하며, 관리자도 허용 목록에 있어야 통과합니다.
pub struct RequireRole {
    allowed: Rc<[Role]>,
}

impl RequireRole {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireRoleService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleService {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleService<S> {
    service: Rc<S>,
    allowed: Rc<[Role]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleService<S>
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
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let subject = req
                .extensions()
                .get::<AuthenticatedSession>()
                .map(|session| {
                    let identity = &session.identity;
                    (identity.id, identity.role, identity.has_any_role(&allowed))
                });

            let Some((user_id, role, permitted)) = subject else {
                return Ok(reject(req, authentication_required()));
            };

            if !permitted {
                log::warn!("권한 부족: 사용자 ID {} ({}), 허용 역할: {:?}", user_id, role, allowed);
                return Ok(reject(
                    req,
                    AppError::AuthorizationError("User doesn't have permission to access".to_string()),
                ));
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
    use uuid::Uuid;

    use crate::domain::models::{Identity, TokenClaims};

    fn session(role: Role) -> AuthenticatedSession {
        AuthenticatedSession {
            identity: Identity {
                id: Uuid::new_v4(),
                role,
                punishment: None,
            },
            claims: TokenClaims {
                iss: "HireMeMaybe".to_string(),
                sub: Uuid::nil().to_string(),
                iat: 0,
                exp: i64::MAX,
            },
            token: "t".to_string(),
        }
    }

    async fn status_for(role: Option<Role>, allowed: Vec<Role>) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(RequireRole::new(allowed))
                .wrap_fn(move |req, srv| {
                    if let Some(role) = role {
                        req.extensions_mut().insert(session(role));
                    }
                    srv.call(req)
                })
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        test::call_service(&app, test::TestRequest::get().uri("/").to_request())
            .await
            .status()
    }

    #[actix_web::test]
    async fn test_role_in_set_passes() {
        assert_eq!(status_for(Some(Role::Cpsk), vec![Role::Cpsk, Role::Company]).await, StatusCode::OK);
        assert_eq!(status_for(Some(Role::Company), vec![Role::Cpsk, Role::Company]).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_role_outside_set_is_forbidden() {
        assert_eq!(status_for(Some(Role::Visitor), vec![Role::Cpsk]).await, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_admin_is_not_implicitly_allowed() {
        assert_eq!(status_for(Some(Role::Admin), vec![Role::Cpsk]).await, StatusCode::FORBIDDEN);
        assert_eq!(status_for(Some(Role::Admin), vec![Role::Admin]).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_session_is_unauthorized() {
        assert_eq!(status_for(None, vec![Role::Admin]).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_forbidden_body() {
        let app = test::init_service(
            App::new()
                .wrap(RequireRole::new([Role::Admin]))
                .wrap_fn(|req, srv| {
                    req.extensions_mut().insert(session(Role::Company));
                    srv.call(req)
                })
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let json: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(json["error"], "User doesn't have permission to access");
    }
}
