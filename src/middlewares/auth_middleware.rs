//! 세션 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 토큰을 검증하고 세션을 해석합니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::RequireAuthenticationService;
use crate::services::auth::SessionValidator;

/// 세션 인증 미들웨어
///
/// | 실패 원인 | 응답 |
/// |-----------|------|
/// | 헤더 누락/형식 오류 | 400 |
/// | 토큰 검증 실패, 만료, 발급자 불일치, 폐기, 사용자 없음 | 401 |
/// | 저장소 오류 | 500 |
pub struct RequireAuthentication {
    validator: Arc<SessionValidator>,
}

impl RequireAuthentication {
    pub fn new(validator: Arc<SessionValidator>) -> Self {
        Self { validator }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for RequireAuthentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireAuthenticationService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthenticationService {
            service: Rc::new(service),
            validator: self.validator.clone(),
        }))
    }
}
