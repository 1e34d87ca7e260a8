// src/models/tournament.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::error::TournamentError;

/// Opaque team identifier as handed to us by the roster collaborator
pub type TeamId = String;

/// Wire sentinel for an empty bracket slot
pub const BYE: &str = "BYE";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Postponed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl From<String> for GameStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "scheduled" => GameStatus::Scheduled,
            "in_progress" => GameStatus::InProgress,
            "completed" => GameStatus::Completed,
            "postponed" => GameStatus::Postponed,
            "cancelled" => GameStatus::Cancelled,
            _ => GameStatus::Unknown,
        }
    }
}

/// A pool-play game as reported by the scoring collaborator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: u32,
    pub away_score: u32,
    pub status: GameStatus,
}

impl GameResult {
    pub fn completed(
        home_team_id: impl Into<TeamId>,
        away_team_id: impl Into<TeamId>,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            home_team_id: home_team_id.into(),
            away_team_id: away_team_id.into(),
            home_score,
            away_score,
            status: GameStatus::Completed,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
    pub run_differential: i64,
    pub games_played: u32,
    #[serde(default)]
    pub win_percentage: f64,
    /// 1-based rank, only present once the standings have been sorted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl TeamStanding {
    pub fn new(team_id: impl Into<TeamId>, team_name: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            wins: 0,
            losses: 0,
            ties: 0,
            runs_scored: 0,
            runs_allowed: 0,
            run_differential: 0,
            games_played: 0,
            win_percentage: 0.0,
            seed: None,
        }
    }

    /// Fold one completed game into the counters, from this team's side
    pub fn record_game(&mut self, scored: u32, allowed: u32) {
        self.games_played += 1;
        self.runs_scored += scored;
        self.runs_allowed += allowed;
        match scored.cmp(&allowed) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.ties += 1,
        }
    }

    /// Recompute the derived columns from the raw counters
    pub fn refresh_derived(&mut self) {
        self.run_differential = i64::from(self.runs_scored) - i64::from(self.runs_allowed);
        self.win_percentage = if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games_played)
        };
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum BracketType {
    SingleElimination,
    DoubleElimination,
}

impl BracketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BracketType::SingleElimination => "single_elimination",
            BracketType::DoubleElimination => "double_elimination",
        }
    }
}

impl fmt::Display for BracketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BracketType {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_elimination" => Ok(BracketType::SingleElimination),
            "double_elimination" => Ok(BracketType::DoubleElimination),
            other => Err(TournamentError::UnknownBracketType(other.to_string())),
        }
    }
}

impl TryFrom<String> for BracketType {
    type Error = TournamentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One slot of the seeding array: a team or an empty (bye) position
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum SeedSlot {
    Team(TeamId),
    Bye,
}

impl SeedSlot {
    pub fn team_id(&self) -> Option<&str> {
        match self {
            SeedSlot::Team(id) => Some(id.as_str()),
            SeedSlot::Bye => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, SeedSlot::Bye)
    }
}

impl From<String> for SeedSlot {
    fn from(s: String) -> Self {
        if s == BYE {
            SeedSlot::Bye
        } else {
            SeedSlot::Team(s)
        }
    }
}

impl From<SeedSlot> for String {
    fn from(slot: SeedSlot) -> Self {
        match slot {
            SeedSlot::Team(id) => id,
            SeedSlot::Bye => BYE.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    #[default]
    Winners,
    Losers,
    Championship,
}

impl BracketSide {
    pub fn label(&self) -> &'static str {
        match self {
            BracketSide::Winners => "winners",
            BracketSide::Losers => "losers",
            BracketSide::Championship => "championship",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BracketMatch {
    pub game_number: u32,
    pub round: u32,
    #[serde(default)]
    pub bracket_side: BracketSide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team_id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team_id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team_seed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team_seed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_team_id: Option<TeamId>,
    #[serde(default)]
    pub is_bye: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_game_number: Option<u32>,
    /// Where the loser drops to (double elimination, winners' side only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser_next_game_number: Option<u32>,
}

impl BracketMatch {
    /// A future-round match whose participants are not known yet
    pub fn placeholder(game_number: u32, round: u32, bracket_side: BracketSide) -> Self {
        Self {
            game_number,
            round,
            bracket_side,
            ..Default::default()
        }
    }

    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.home_team_id
            .as_deref()
            .into_iter()
            .chain(self.away_team_id.as_deref())
    }

    pub fn has_participant(&self, team_id: &str) -> bool {
        self.participants().any(|id| id == team_id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TournamentBracket {
    pub tournament_id: Uuid,
    pub bracket_type: BracketType,
    pub matches: Vec<BracketMatch>,
    pub total_rounds: u32,
    pub total_games: u32,
}

impl TournamentBracket {
    pub fn find_match(&self, game_number: u32) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.game_number == game_number)
    }

    pub fn find_match_mut(&mut self, game_number: u32) -> Option<&mut BracketMatch> {
        self.matches.iter_mut().find(|m| m.game_number == game_number)
    }

    pub fn matches_in_round(&self, side: BracketSide, round: u32) -> impl Iterator<Item = &BracketMatch> {
        self.matches
            .iter()
            .filter(move |m| m.bracket_side == side && m.round == round)
    }

    /// The championship (double) or winners' final (single) match
    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.next_game_number.is_none())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ByeAssignment {
    pub team_id: TeamId,
    pub team_name: String,
    pub seed: u32,
    pub bye_round: u32,
    pub next_game_number: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// A pool-play fixture produced by the schedule generator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub game_number: u32,
    pub leg: u32,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeedingResponse {
    pub bracket_type: BracketType,
    pub seeding: Vec<SeedSlot>,
    pub byes: Vec<ByeAssignment>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTournament {
    pub standings: Vec<TeamStanding>,
    pub byes: Vec<ByeAssignment>,
    pub bracket: TournamentBracket,
    pub validation: ValidationReport,
    pub generated_at: DateTime<Utc>,
}

// Request DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRequest {
    pub teams: Vec<Team>,
    #[serde(default)]
    pub games: Vec<GameResult>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BracketRequest {
    pub teams: Vec<Team>,
    #[serde(default)]
    pub games: Vec<GameResult>,
    pub bracket_type: BracketType,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValidateBracketRequest {
    pub bracket: TournamentBracket,
    pub standings: Vec<TeamStanding>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportWinnerRequest {
    pub bracket: TournamentBracket,
    pub game_number: u32,
    pub winner_team_id: TeamId,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub teams: Vec<Team>,
    #[serde(default = "default_legs")]
    pub legs: u32,
}

fn default_legs() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamAssignmentRequest {
    pub players: Vec<String>,
    pub team_count: usize,
    pub seed: u64,
}
