use actix_web::HttpResponse;

use crate::models::common::ApiResponse;
use crate::models::error::TournamentError;

pub mod bracket_handler;
pub mod schedule_handler;
pub mod standings_handler;
pub mod team_assignment_handler;

/// Caller errors all map to 400 with the engine's message as the cause
pub(crate) fn bad_request(message: &str, error: TournamentError) -> HttpResponse {
    tracing::warn!("{}: {}", message, error);
    HttpResponse::BadRequest().json(ApiResponse::<()>::error_with_message(message, error.to_string()))
}
