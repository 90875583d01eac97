//! HTTP handlers and route configuration.

mod attendees;
mod auth;
mod events;
mod views;

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::Serialize;

use eventdesk_shared::ApiResponse;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/api")
                // Public routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login)),
                )
                // Authenticated routes
                .service(
                    web::scope("/events")
                        .service(
                            web::resource("")
                                .route(web::get().to(events::get_all_events))
                                .route(web::post().to(events::create_event))
                                .default_service(web::to(method_not_allowed)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(events::get_event_by_id))
                                .route(web::put().to(events::update_event))
                                .route(web::delete().to(events::delete_event))
                                .default_service(web::to(method_not_allowed)),
                        ),
                )
                .service(
                    web::scope("/attendees")
                        .service(
                            web::resource("")
                                .route(web::get().to(attendees::get_all_attendees))
                                .route(web::post().to(attendees::register_attendee))
                                .default_service(web::to(method_not_allowed)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(attendees::get_attendee_by_id))
                                .route(web::put().to(attendees::update_attendee))
                                .route(web::delete().to(attendees::delete_attendee))
                                .default_service(web::to(method_not_allowed)),
                        ),
                ),
        )
        .default_service(web::to(route_not_found));
}

/// Wrap `data` in a success envelope with a matching HTTP status.
fn respond<T: Serialize>(status: StatusCode, data: T, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::success(data, message, status.as_u16()))
}

async fn route_not_found() -> HttpResponse {
    AppError::NotFound("No handler for this route".to_string()).error_response()
}

async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    AppError::MethodNotAllowed(format!("Method {} is not supported for this route", req.method()))
        .error_response()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Malformed request body: {err}")).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid path: {err}")).into())
}
