use chrono::Utc;
use uuid::Uuid;

use crate::models::error::TournamentResult;
use crate::models::tournament::{
    BracketType, GameResult, GeneratedTournament, SeedingResponse, Team, TournamentBracket,
};
use crate::tournament::bracket::BracketBuilder;
use crate::tournament::byes::ByeAssigner;
use crate::tournament::progression::{advance_byes, report_winner};
use crate::tournament::seeding::SeedingGenerator;
use crate::tournament::standings::StandingsCalculator;
use crate::tournament::validation::BracketValidator;

/// Chains the engine components for one tournament request
#[derive(Debug, Default)]
pub struct TournamentService {
    standings: StandingsCalculator,
    seeding: SeedingGenerator,
    byes: ByeAssigner,
    bracket: BracketBuilder,
    validator: BracketValidator,
}

impl TournamentService {
    pub fn new() -> Self {
        Self {
            standings: StandingsCalculator::new(),
            seeding: SeedingGenerator::new(),
            byes: ByeAssigner::new(),
            bracket: BracketBuilder::new(),
            validator: BracketValidator::new(),
        }
    }

    /// Standings, byes, bracket and its validation report in one pass.
    ///
    /// A bracket that fails validation is still returned; `validation.is_valid`
    /// tells the caller whether it is safe to persist.
    pub fn generate(
        &self,
        tournament_id: Uuid,
        teams: &[Team],
        games: &[GameResult],
        bracket_type: BracketType,
    ) -> TournamentResult<GeneratedTournament> {
        let standings = self.standings.compute_standings(teams, games)?;
        let byes = self.byes.assign_byes(&standings, bracket_type)?;
        let bracket = self.bracket.build_bracket(tournament_id, &standings, bracket_type)?;
        let validation = self.validator.validate(&bracket, &standings);

        if !validation.is_valid {
            tracing::warn!(
                "Generated bracket for tournament {} has {} validation errors",
                tournament_id,
                validation.errors.len()
            );
        }

        tracing::info!(
            "Generated tournament {}: {} teams, {} byes, {} games",
            tournament_id,
            standings.len(),
            byes.len(),
            bracket.total_games
        );

        Ok(GeneratedTournament {
            standings,
            byes,
            bracket,
            validation,
            generated_at: Utc::now(),
        })
    }

    /// Seeding array and byes without building the match tree
    pub fn seeding(
        &self,
        teams: &[Team],
        games: &[GameResult],
        bracket_type: BracketType,
    ) -> TournamentResult<SeedingResponse> {
        let standings = self.standings.compute_standings(teams, games)?;
        let seeding = self.seeding.generate_seeding(&standings, bracket_type)?;
        let byes = self.byes.assign_byes(&standings, bracket_type)?;

        Ok(SeedingResponse {
            bracket_type,
            seeding,
            byes,
        })
    }

    /// Record a result and return the updated bracket. Pending bye winners are
    /// moved into round 2 first so their slots are never mistaken for open.
    pub fn record_winner(
        &self,
        mut bracket: TournamentBracket,
        game_number: u32,
        winner_team_id: &str,
    ) -> TournamentResult<TournamentBracket> {
        advance_byes(&mut bracket)?;
        report_winner(&mut bracket, game_number, winner_team_id)?;
        Ok(bracket)
    }
}
