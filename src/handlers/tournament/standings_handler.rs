use actix_web::{web, HttpResponse, Result};

use crate::models::common::ApiResponse;
use crate::models::tournament::StandingsRequest;
use crate::tournament::{StandingsCalculator, TournamentInputValidator};
use super::bad_request;

#[tracing::instrument(
    name = "Compute standings",
    skip(request, validator),
    fields(
        teams = request.teams.len(),
        games = request.games.len()
    )
)]
pub async fn compute_standings(
    request: web::Json<StandingsRequest>,
    validator: web::Data<TournamentInputValidator>,
) -> Result<HttpResponse> {
    if let Err(e) = validator
        .validate_teams(&request.teams)
        .and_then(|_| validator.validate_games(&request.games))
    {
        return Ok(bad_request("Invalid standings request", e));
    }

    let calculator = StandingsCalculator::new();
    match calculator.compute_standings(&request.teams, &request.games) {
        Ok(standings) => {
            tracing::info!("Computed standings for {} teams", standings.len());
            Ok(HttpResponse::Ok().json(ApiResponse::success("Standings computed", standings)))
        }
        Err(e) => Ok(bad_request("Failed to compute standings", e)),
    }
}
