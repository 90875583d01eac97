//! Authentication handlers.

use actix_web::{HttpResponse, http::StatusCode, web};

use eventdesk_core::DomainError;
use eventdesk_core::service::Registration;
use eventdesk_shared::dto::{LoginRequest, RegisterUserRequest};

use super::respond;
use super::views::user_response;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .auth
        .register(Registration {
            username: req.username,
            password: req.password,
            email: req.email,
        })
        .await?;

    Ok(respond(
        StatusCode::CREATED,
        user_response(user),
        "User registered successfully",
    ))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let token = state
        .auth
        .login(&req.username, &req.password)
        .await
        .map_err(|err| match err {
            DomainError::InvalidCredentials => AppError::Unauthorized(
                "Unauthorized: Invalid username or password".to_string(),
            ),
            other => AppError::Internal(format!("An error occurred during login: {other}")),
        })?;

    Ok(respond(StatusCode::OK, token, "Login successful"))
}
