//! Event handlers.

use actix_web::{HttpResponse, http::StatusCode, web};

use eventdesk_shared::dto::EventRequest;

use super::respond;
use super::views::{event_from_request, event_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/events
pub async fn create_event(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<EventRequest>,
) -> AppResult<HttpResponse> {
    let details = state
        .events
        .create(event_from_request(body.into_inner()))
        .await?;

    tracing::debug!(actor = %identity.username, event_id = details.event.id, "Event created via API");
    Ok(respond(
        StatusCode::CREATED,
        event_response(details),
        "Event created successfully",
    ))
}

/// GET /api/events
pub async fn get_all_events(
    _identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let events: Vec<_> = state
        .events
        .get_all()
        .await?
        .into_iter()
        .map(event_response)
        .collect();

    Ok(respond(StatusCode::OK, events, "Events retrieved successfully"))
}

/// GET /api/events/{id}
pub async fn get_event_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let details = state
        .events
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event not found with ID: {id}")))?;

    Ok(respond(
        StatusCode::OK,
        event_response(details),
        "Event retrieved successfully",
    ))
}

/// PUT /api/events/{id}
pub async fn update_event(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<EventRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let details = state
        .events
        .update(id, event_from_request(body.into_inner()))
        .await?;

    tracing::debug!(actor = %identity.username, event_id = id, "Event replaced via API");
    Ok(respond(
        StatusCode::OK,
        event_response(details),
        "Event updated successfully",
    ))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.events.delete(id).await?;

    tracing::debug!(actor = %identity.username, event_id = id, "Event deleted via API");
    Ok(HttpResponse::NoContent().finish())
}
