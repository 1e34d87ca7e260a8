use actix_web::{web, HttpResponse, Result};

use crate::models::common::ApiResponse;
use crate::models::tournament::TeamAssignmentRequest;
use crate::tournament::TournamentInputValidator;
use crate::utils::team_assignment::assign_players_to_teams;
use super::bad_request;

#[tracing::instrument(
    name = "Assign players to teams",
    skip(request, validator),
    fields(
        players = request.players.len(),
        team_count = request.team_count,
        seed = request.seed
    )
)]
pub async fn assign_teams(
    request: web::Json<TeamAssignmentRequest>,
    validator: web::Data<TournamentInputValidator>,
) -> Result<HttpResponse> {
    if let Err(e) = validator.validate_team_assignment(&request.players, request.team_count) {
        return Ok(bad_request("Invalid team assignment request", e));
    }

    match assign_players_to_teams(&request.players, request.team_count, request.seed) {
        Ok(teams) => Ok(HttpResponse::Ok().json(ApiResponse::success("Players assigned", teams))),
        Err(e) => Ok(bad_request("Failed to assign players", e)),
    }
}
