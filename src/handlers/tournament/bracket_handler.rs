use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::models::common::ApiResponse;
use crate::models::tournament::{BracketRequest, ReportWinnerRequest, ValidateBracketRequest};
use crate::tournament::{BracketValidator, TournamentInputValidator, TournamentService};
use super::bad_request;

fn validate_bracket_request(
    validator: &TournamentInputValidator,
    request: &BracketRequest,
) -> Option<HttpResponse> {
    validator
        .validate_teams(&request.teams)
        .and_then(|_| validator.validate_games(&request.games))
        .err()
        .map(|e| bad_request("Invalid bracket request", e))
}

/// Seeding array and byes for the current standings
#[tracing::instrument(
    name = "Generate seeding",
    skip(request, validator, service),
    fields(
        teams = request.teams.len(),
        bracket_type = %request.bracket_type
    )
)]
pub async fn generate_seeding(
    request: web::Json<BracketRequest>,
    validator: web::Data<TournamentInputValidator>,
    service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    if let Some(response) = validate_bracket_request(&validator, &request) {
        return Ok(response);
    }

    match service.seeding(&request.teams, &request.games, request.bracket_type) {
        Ok(seeding) => Ok(HttpResponse::Ok().json(ApiResponse::success("Seeding generated", seeding))),
        Err(e) => Ok(bad_request("Failed to generate seeding", e)),
    }
}

/// Full pipeline: standings, byes, bracket and its validation report
#[tracing::instrument(
    name = "Generate bracket",
    skip(request, validator, service),
    fields(
        tournament_id = %path.as_ref(),
        teams = request.teams.len(),
        bracket_type = %request.bracket_type
    )
)]
pub async fn generate_bracket(
    path: web::Path<Uuid>,
    request: web::Json<BracketRequest>,
    validator: web::Data<TournamentInputValidator>,
    service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    let tournament_id = path.into_inner();
    if let Some(response) = validate_bracket_request(&validator, &request) {
        return Ok(response);
    }

    match service.generate(tournament_id, &request.teams, &request.games, request.bracket_type) {
        Ok(generated) => {
            let message = if generated.validation.is_valid {
                "Bracket generated"
            } else {
                "Bracket generated with validation errors"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(message, generated)))
        }
        Err(e) => Ok(bad_request("Failed to generate bracket", e)),
    }
}

/// Findings are data, so an invalid bracket still answers 200
#[tracing::instrument(
    name = "Validate bracket",
    skip(request),
    fields(
        tournament_id = %request.bracket.tournament_id,
        matches = request.bracket.matches.len()
    )
)]
pub async fn validate_bracket(
    request: web::Json<ValidateBracketRequest>,
) -> Result<HttpResponse> {
    let report = BracketValidator::new().validate(&request.bracket, &request.standings);
    let message = if report.is_valid {
        "Bracket is valid".to_string()
    } else {
        format!("Bracket has {} errors", report.errors.len())
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(message, report)))
}

#[tracing::instrument(
    name = "Report bracket winner",
    skip(request, service),
    fields(
        tournament_id = %request.bracket.tournament_id,
        game_number = request.game_number,
        winner = %request.winner_team_id
    )
)]
pub async fn report_winner(
    request: web::Json<ReportWinnerRequest>,
    service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    let ReportWinnerRequest {
        bracket,
        game_number,
        winner_team_id,
    } = request.into_inner();

    match service.record_winner(bracket, game_number, &winner_team_id) {
        Ok(bracket) => Ok(HttpResponse::Ok().json(ApiResponse::success("Winner recorded", bracket))),
        Err(e) => Ok(bad_request("Failed to record winner", e)),
    }
}
