use std::collections::HashSet;

use crate::config::settings::TournamentSettings;
use crate::models::error::{TournamentError, TournamentResult};
use crate::models::tournament::{GameResult, Team, BYE};

/// Request-level sanity checks applied before anything reaches the engine
#[derive(Debug, Clone)]
pub struct TournamentInputValidator {
    settings: TournamentSettings,
}

impl TournamentInputValidator {
    pub fn new(settings: TournamentSettings) -> Self {
        Self { settings }
    }

    /// Validate the team list of a standings or bracket request
    pub fn validate_teams(&self, teams: &[Team]) -> TournamentResult<()> {
        let min_teams = self.settings.min_teams;
        let max_teams = self.settings.max_teams;

        if teams.len() < min_teams {
            return Err(TournamentError::InvalidRequest(format!(
                "Minimum {} teams required, got {}",
                min_teams,
                teams.len()
            )));
        }
        if teams.len() > max_teams {
            return Err(TournamentError::InvalidRequest(format!(
                "Maximum {} teams allowed, got {}",
                max_teams,
                teams.len()
            )));
        }

        let mut unique_teams = HashSet::new();
        for team in teams {
            let id = self.sanitize_string_input(&team.id);
            if id.is_empty() {
                return Err(TournamentError::InvalidRequest("Team ID cannot be empty".into()));
            }
            if id == BYE {
                return Err(TournamentError::ReservedTeamId(id));
            }
            if !unique_teams.insert(team.id.as_str()) {
                return Err(TournamentError::DuplicateTeam(team.id.clone()));
            }
            self.validate_team_name(&team.name)?;
        }

        Ok(())
    }

    /// Team names must carry some visible content
    pub fn validate_team_name(&self, name: &str) -> TournamentResult<()> {
        let sanitized = self.sanitize_string_input(name);

        if sanitized.is_empty() {
            return Err(TournamentError::InvalidRequest("Team name cannot be empty".into()));
        }
        if sanitized.len() > 100 {
            return Err(TournamentError::InvalidRequest(
                "Team name too long (max 100 characters)".into(),
            ));
        }

        Ok(())
    }

    /// Scores above the configured ceiling are almost always data-entry errors
    pub fn validate_games(&self, games: &[GameResult]) -> TournamentResult<()> {
        let max_score = self.settings.max_score;
        for (index, game) in games.iter().enumerate() {
            for (side, score) in [("Home", game.home_score), ("Away", game.away_score)] {
                if score > max_score {
                    return Err(TournamentError::InvalidRequest(format!(
                        "{} score too high in game {}: {} (max {})",
                        side,
                        index + 1,
                        score,
                        max_score
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn validate_legs(&self, legs: u32) -> TournamentResult<()> {
        if legs == 0 || legs > self.settings.max_pool_legs {
            return Err(TournamentError::InvalidRequest(format!(
                "Legs must be between 1 and {}, got {}",
                self.settings.max_pool_legs, legs
            )));
        }
        Ok(())
    }

    pub fn validate_team_assignment(&self, players: &[String], team_count: usize) -> TournamentResult<()> {
        if team_count == 0 {
            return Err(TournamentError::InvalidRequest("Team count must be positive".into()));
        }
        if team_count > self.settings.max_teams {
            return Err(TournamentError::InvalidRequest(format!(
                "Maximum {} teams allowed, got {}",
                self.settings.max_teams, team_count
            )));
        }
        if players.iter().any(|p| self.sanitize_string_input(p).is_empty()) {
            return Err(TournamentError::InvalidRequest("Player names cannot be empty".into()));
        }
        Ok(())
    }

    /// Trim and strip null bytes
    pub fn sanitize_string_input(&self, input: &str) -> String {
        input
            .chars()
            .filter(|&c| c != '\0')
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl Default for TournamentInputValidator {
    fn default() -> Self {
        Self::new(TournamentSettings::default())
    }
}
