//! Session gate middleware
//!
//! Reads the `token` cookie, verifies it and stores the resulting
//! [`IdentityClaim`] in request extensions. Requests without a valid token
//! are answered with 401 before the wrapped handler runs. Applied per route
//! according to `routes::ROUTES`.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::cookie::TOKEN_COOKIE;
use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware { service }))
    }
}

pub struct SessionGateMiddleware<S> {
    service: S,
}

/// Why a request was turned away; only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingCookie,
    EmptyCookie,
    InvalidToken,
    MissingState,
}

impl Rejection {
    fn as_str(self) -> &'static str {
        match self {
            Rejection::MissingCookie => "missing_cookie",
            Rejection::EmptyCookie => "empty_cookie",
            Rejection::InvalidToken => "invalid_token",
            Rejection::MissingState => "missing_state",
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<(), Rejection> {
    let cookie = req.cookie(TOKEN_COOKIE).ok_or(Rejection::MissingCookie)?;
    if cookie.value().is_empty() {
        return Err(Rejection::EmptyCookie);
    }

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(Rejection::MissingState)?;

    let claim =
        verify_token(cookie.value(), &state.security).map_err(|_| Rejection::InvalidToken)?;
    req.extensions_mut().insert(claim);
    Ok(())
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            // Rendered inside the returned future, which runs in the trace scope
            Err(rejection) => Box::pin(async move {
                let error = if rejection == Rejection::MissingState {
                    AppError::internal("AppState not available")
                } else {
                    security::auth_rejected(rejection.as_str(), req.path());
                    AppError::unauthenticated()
                };
                let response = error.error_response();
                Ok(req.into_response(response).map_into_right_body())
            }),
        }
    }
}
