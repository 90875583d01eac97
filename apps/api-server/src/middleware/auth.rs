//! Authentication gate middleware and the identity extractor.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderMap},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use eventdesk_core::AuthService;
use eventdesk_core::domain::User;

use super::error::AppError;
use super::policy::{AccessPolicy, Decision};

/// Authenticated caller, attached to the request by [`AuthGate`].
///
/// Use this in handlers that need to know who is calling:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or_else(AppError::authentication_required),
        )
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
}

/// Per-request authentication gate.
///
/// Resolves the bearer token (if any) to an [`Identity`], then applies the
/// [`AccessPolicy`]. A bad token never fails the request by itself; it just
/// leaves the request unauthenticated for the policy to judge.
pub struct AuthGate {
    auth: Arc<AuthService>,
    policy: Rc<AccessPolicy>,
}

impl AuthGate {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self::with_policy(auth, AccessPolicy::standard())
    }

    pub fn with_policy(auth: Arc<AuthService>, policy: AccessPolicy) -> Self {
        Self {
            auth,
            policy: Rc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service: Rc::new(service),
            auth: self.auth.clone(),
            policy: self.policy.clone(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: Rc<S>,
    auth: Arc<AuthService>,
    policy: Rc<AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let auth = self.auth.clone();
        let policy = self.policy.clone();

        Box::pin(async move {
            let identity = match bearer_token(req.headers()) {
                Some(token) => match auth.authenticate(&token).await {
                    Ok(user) => user.map(Identity::from),
                    Err(e) => {
                        tracing::error!(error = %e, "Credential store lookup failed");
                        None
                    }
                },
                None => None,
            };

            let decision = policy.evaluate(req.path(), identity.is_some());

            if let Some(identity) = identity {
                tracing::debug!(
                    user_id = identity.user_id,
                    username = %identity.username,
                    role = %identity.role,
                    "Request authenticated"
                );
                req.extensions_mut().insert(identity);
            }

            match decision {
                Decision::Permit => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Decision::Deny => {
                    tracing::debug!(path = %req.path(), "Rejected unauthenticated request");
                    let response = AppError::authentication_required().error_response();
                    let (http_req, _payload) = req.into_parts();
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
            }
        })
    }
}
