use std::collections::HashSet;

use crate::models::error::{TournamentError, TournamentResult};
use crate::models::tournament::{ScheduledGame, Team};

/// Pool-play fixtures that feed the standings
#[derive(Debug, Default)]
pub struct ScheduleService;

impl ScheduleService {
    pub fn new() -> Self {
        Self
    }

    /// Round-robin schedule: every pair meets once per leg.
    /// Even legs (2, 4, ...) are return fixtures with home and away swapped.
    pub fn generate_pool_schedule(&self, teams: &[Team], legs: u32) -> TournamentResult<Vec<ScheduledGame>> {
        let team_count = teams.len();
        if team_count < 2 {
            tracing::warn!("Cannot create schedule with less than 2 teams");
            return Err(TournamentError::NotEnoughTeams(team_count));
        }
        if legs == 0 {
            return Err(TournamentError::InvalidRequest("At least one leg is required".into()));
        }

        let mut unique_teams = HashSet::with_capacity(team_count);
        for team in teams {
            if !unique_teams.insert(team.id.as_str()) {
                return Err(TournamentError::DuplicateTeam(team.id.clone()));
            }
        }

        tracing::info!("Generating {}-leg round-robin schedule for {} teams", legs, team_count);

        let pairs_per_leg = team_count * (team_count - 1) / 2;
        let mut games = Vec::with_capacity(pairs_per_leg * legs as usize);
        let mut game_number = 1;

        for leg in 1..=legs {
            let return_leg = leg % 2 == 0;
            for i in 0..team_count {
                for j in (i + 1)..team_count {
                    let (home, away) = if return_leg { (j, i) } else { (i, j) };

                    tracing::debug!(
                        "Leg {} game {}: {} (home) vs {} (away)",
                        leg,
                        game_number,
                        teams[home].id,
                        teams[away].id
                    );

                    games.push(ScheduledGame {
                        game_number,
                        leg,
                        home_team_id: teams[home].id.clone(),
                        away_team_id: teams[away].id.clone(),
                    });
                    game_number += 1;
                }
            }
        }

        tracing::info!("Schedule generation complete: {} total games", games.len());

        Ok(games)
    }
}
