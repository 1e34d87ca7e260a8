use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::error::{TournamentError, TournamentResult};
use crate::models::tournament::{GameResult, Team, TeamStanding, BYE};

/// Folds pool-play results into ranked standings
#[derive(Debug, Default)]
pub struct StandingsCalculator;

impl StandingsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute standings for `teams` from the completed entries of `games`.
    ///
    /// Every game, completed or not, must reference teams present in `teams`.
    /// Ranking is wins, then run differential, then runs scored, all
    /// descending. The sort is stable, so teams that tie on every key keep
    /// their input order.
    pub fn compute_standings(
        &self,
        teams: &[Team],
        games: &[GameResult],
    ) -> TournamentResult<Vec<TeamStanding>> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(teams.len());
        let mut standings = Vec::with_capacity(teams.len());

        for team in teams {
            if team.id == BYE {
                return Err(TournamentError::ReservedTeamId(team.id.clone()));
            }
            if index.insert(team.id.as_str(), standings.len()).is_some() {
                return Err(TournamentError::DuplicateTeam(team.id.clone()));
            }
            standings.push(TeamStanding::new(team.id.clone(), team.name.clone()));
        }

        let mut completed_games = 0;
        for game in games {
            if game.home_team_id == game.away_team_id {
                return Err(TournamentError::SelfMatch(game.home_team_id.clone()));
            }
            let home = *index
                .get(game.home_team_id.as_str())
                .ok_or_else(|| TournamentError::UnknownTeam(game.home_team_id.clone()))?;
            let away = *index
                .get(game.away_team_id.as_str())
                .ok_or_else(|| TournamentError::UnknownTeam(game.away_team_id.clone()))?;

            if !game.is_completed() {
                continue;
            }

            standings[home].record_game(game.home_score, game.away_score);
            standings[away].record_game(game.away_score, game.home_score);
            completed_games += 1;
        }

        for standing in &mut standings {
            standing.refresh_derived();
        }

        standings.sort_by(compare_standings);

        for (position, standing) in standings.iter_mut().enumerate() {
            standing.seed = Some((position + 1) as u32);
        }

        tracing::debug!(
            "Computed standings for {} teams from {} completed games ({} ignored)",
            standings.len(),
            completed_games,
            games.len() - completed_games
        );

        Ok(standings)
    }
}

/// Ordering used for seeding: best team first
pub fn compare_standings(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.run_differential.cmp(&a.run_differential))
        .then_with(|| b.runs_scored.cmp(&a.runs_scored))
}
