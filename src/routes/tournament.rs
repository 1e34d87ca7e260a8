// src/routes/tournament.rs
use actix_web::{post, web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::tournament::{bracket_handler, schedule_handler, standings_handler, team_assignment_handler};
use crate::models::tournament::*;
use crate::tournament::{TournamentInputValidator, TournamentService};

/// Rank teams from pool-play results
#[post("/standings")]
async fn compute_standings(
    request: web::Json<StandingsRequest>,
    validator: web::Data<TournamentInputValidator>,
) -> Result<HttpResponse> {
    standings_handler::compute_standings(request, validator).await
}

/// Seeding array and byes without the match tree
#[post("/seeding")]
async fn generate_seeding(
    request: web::Json<BracketRequest>,
    validator: web::Data<TournamentInputValidator>,
    service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    bracket_handler::generate_seeding(request, validator, service).await
}

/// Validate a bracket against its standings
#[post("/bracket/validate")]
async fn validate_bracket(
    request: web::Json<ValidateBracketRequest>,
) -> Result<HttpResponse> {
    bracket_handler::validate_bracket(request).await
}

/// Record a game result and advance both teams
#[post("/bracket/winner")]
async fn report_winner(
    request: web::Json<ReportWinnerRequest>,
    service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    bracket_handler::report_winner(request, service).await
}

/// Build the full bracket for a tournament
#[post("/{tournament_id}/bracket")]
async fn generate_bracket(
    path: web::Path<Uuid>,
    request: web::Json<BracketRequest>,
    validator: web::Data<TournamentInputValidator>,
    service: web::Data<TournamentService>,
) -> Result<HttpResponse> {
    bracket_handler::generate_bracket(path, request, validator, service).await
}

/// Round-robin pool schedule
#[post("/schedule")]
async fn generate_schedule(
    request: web::Json<ScheduleRequest>,
    validator: web::Data<TournamentInputValidator>,
) -> Result<HttpResponse> {
    schedule_handler::generate_schedule(request, validator).await
}

/// Seeded random split of players into teams
#[post("/team_assignment")]
async fn assign_teams(
    request: web::Json<TeamAssignmentRequest>,
    validator: web::Data<TournamentInputValidator>,
) -> Result<HttpResponse> {
    team_assignment_handler::assign_teams(request, validator).await
}
