// src/models/error.rs
use thiserror::Error as ThisError;

use crate::tournament::seeding::MAX_SEEDED_TEAMS;

pub type TournamentResult<T> = Result<T, TournamentError>;

/// Caller configuration errors. The engine fails loudly on these instead of
/// handing a malformed bracket downstream.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum TournamentError {
    #[error("Standings are empty, nothing to seed")]
    EmptyStandings,

    #[error("At least 2 teams are required to build a bracket, got {0}")]
    NotEnoughTeams(usize),

    #[error("Unknown bracket type '{0}', expected single_elimination or double_elimination")]
    UnknownBracketType(String),

    #[error("Game references unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Duplicate team ID found: {0}")]
    DuplicateTeam(String),

    #[error("Team ID '{0}' is reserved for byes")]
    ReservedTeamId(String),

    #[error("Team '{0}' cannot play against itself")]
    SelfMatch(String),

    #[error(
        "No seeding position is defined for rank {rank} ({teams} teams); brackets support at most {} teams",
        MAX_SEEDED_TEAMS
    )]
    UnsupportedSeeding { rank: usize, teams: usize },

    #[error("Game {0} does not exist in this bracket")]
    UnknownGame(u32),

    #[error("Team '{team_id}' is not playing in game {game_number}")]
    NotAParticipant { game_number: u32, team_id: String },

    #[error("Game {0} is still waiting for a participant")]
    MatchNotReady(u32),

    #[error("Game {0} already has a recorded winner")]
    WinnerAlreadyRecorded(u32),

    #[error("Slot in game {game_number} is already taken by '{occupant}'")]
    SlotOccupied { game_number: u32, occupant: String },

    #[error("Bracket links loop back through game {0}")]
    LinkCycle(u32),

    #[error("{0}")]
    InvalidRequest(String),
}
