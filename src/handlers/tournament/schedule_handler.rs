use actix_web::{web, HttpResponse, Result};

use crate::models::common::ApiResponse;
use crate::models::tournament::ScheduleRequest;
use crate::tournament::{ScheduleService, TournamentInputValidator};
use super::bad_request;

#[tracing::instrument(
    name = "Generate pool schedule",
    skip(request, validator),
    fields(
        teams = request.teams.len(),
        legs = request.legs
    )
)]
pub async fn generate_schedule(
    request: web::Json<ScheduleRequest>,
    validator: web::Data<TournamentInputValidator>,
) -> Result<HttpResponse> {
    if let Err(e) = validator
        .validate_teams(&request.teams)
        .and_then(|_| validator.validate_legs(request.legs))
    {
        return Ok(bad_request("Invalid schedule request", e));
    }

    match ScheduleService::new().generate_pool_schedule(&request.teams, request.legs) {
        Ok(games) => Ok(HttpResponse::Ok().json(ApiResponse::success("Schedule generated", games))),
        Err(e) => Ok(bad_request("Failed to generate schedule", e)),
    }
}
