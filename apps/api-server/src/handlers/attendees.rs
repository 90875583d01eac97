//! Attendee handlers.

use actix_web::{HttpResponse, http::StatusCode, web};

use eventdesk_shared::dto::AttendeeRequest;

use super::respond;
use super::views::attendee_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/attendees
pub async fn register_attendee(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<AttendeeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let details = state.attendees.register(req.user.id, req.event.id).await?;

    tracing::debug!(actor = %identity.username, attendee_id = details.attendee.id, "Attendee registered via API");
    Ok(respond(
        StatusCode::CREATED,
        attendee_response(details),
        "Attendee registered successfully",
    ))
}

/// GET /api/attendees
pub async fn get_all_attendees(
    _identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let attendees: Vec<_> = state
        .attendees
        .get_all()
        .await?
        .into_iter()
        .map(attendee_response)
        .collect();

    Ok(respond(
        StatusCode::OK,
        attendees,
        "Attendees retrieved successfully",
    ))
}

/// GET /api/attendees/{id}
pub async fn get_attendee_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let details = state
        .attendees
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Attendee not found with ID: {id}")))?;

    Ok(respond(
        StatusCode::OK,
        attendee_response(details),
        "Attendee retrieved successfully",
    ))
}

/// PUT /api/attendees/{id}
pub async fn update_attendee(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<AttendeeRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let details = state
        .attendees
        .update(id, req.user.id, req.event.id)
        .await?;

    Ok(respond(
        StatusCode::OK,
        attendee_response(details),
        "Attendee updated successfully",
    ))
}

/// DELETE /api/attendees/{id}
pub async fn delete_attendee(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.attendees.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
