//! RequireAuthentication 인증 로직의 핵심적인 기능
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::errors::AppError;
use crate::middlewares::reject;
use crate::services::auth::{AuthFailure, SessionValidator};

/// 실제 인증 로직을 수행하는 서비스
pub struct RequireAuthenticationService<S> {
    pub service: Rc<S>,
    pub validator: Arc<SessionValidator>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthenticationService<S>
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
        let validator = self.validator.clone();

        Box::pin(async move {
            // 출력 불가능한 문자가 포함된 헤더는 없는 것으로 취급
            let authorization = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            match validator.validate(authorization.as_deref()).await {
                Ok(session) => {
                    log::debug!("인증 성공: 사용자 ID {}", session.identity.id);
                    req.extensions_mut().insert(session);
                }
                Err(failure) => {
                    match &failure {
                        AuthFailure::Store(err) => log::error!("세션 검증 중 저장소 오류: {}", err),
                        other => log::warn!("인증 실패: {} ({})", other, req.path()),
                    }
                    return Ok(reject(req, AppError::from(failure)));
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
