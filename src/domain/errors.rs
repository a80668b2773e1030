use thiserror::Error;
use uuid::Uuid;

use crate::domain::matches::value_objects::{MatchStatus, Slot};

/// Errors raised by the match lifecycle and ranking engine
///
/// Every variant is recoverable by the caller. Score-content violations,
/// scheduling violations and illegal status changes each get their own
/// variant so the API layer can show a distinct message per kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid score format: {0}")]
    Parse(String),

    #[error("A match needs at least 2 sets and one side with 2 sets won")]
    InsufficientSets,

    #[error("A match cannot end in a draw")]
    DrawNotAllowed,

    #[error("Set {set_number} was played after the match was already decided")]
    PrematureStop { set_number: usize },

    #[error("Set {set_number} is not a valid padel set: {reason}")]
    InvalidSetScore { set_number: usize, reason: String },

    #[error("Slot unavailable: {slot} is already booked")]
    SlotConflict { slot: Slot },

    #[error("A team cannot play against itself")]
    SameTeamConflict,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },

    #[error("Date, time and court of a {status} match cannot be edited")]
    SchedulingLocked { status: MatchStatus },

    #[error("Court {court} does not exist (courts are numbered 1 to {max_courts})")]
    InvalidCourt { court: u8, max_courts: u8 },

    #[error("Invalid team: {0}")]
    InvalidTeam(String),

    #[error("Team not found: {0}")]
    TeamNotFound(Uuid),

    #[error("Match not found: {0}")]
    MatchNotFound(Uuid),

    #[error("Only scheduled matches can be deleted (match is {status})")]
    NotDeletable { status: MatchStatus },

    #[error("Repository error: {0}")]
    Repository(String),
}

impl EngineError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Parse(_) => "ParseError",
            EngineError::InsufficientSets => "InsufficientSets",
            EngineError::DrawNotAllowed => "DrawNotAllowed",
            EngineError::PrematureStop { .. } => "PrematureStop",
            EngineError::InvalidSetScore { .. } => "InvalidSetScore",
            EngineError::SlotConflict { .. } => "SlotConflict",
            EngineError::SameTeamConflict => "SameTeamConflict",
            EngineError::InvalidTransition { .. } => "InvalidTransition",
            EngineError::SchedulingLocked { .. } => "SchedulingLocked",
            EngineError::InvalidCourt { .. } => "InvalidCourt",
            EngineError::InvalidTeam(_) => "InvalidTeam",
            EngineError::TeamNotFound(_) => "TeamNotFound",
            EngineError::MatchNotFound(_) => "MatchNotFound",
            EngineError::NotDeletable { .. } => "NotDeletable",
            EngineError::Repository(_) => "RepositoryError",
        }
    }

    /// True for errors about the content of a submitted score
    pub fn is_score_error(&self) -> bool {
        matches!(
            self,
            EngineError::Parse(_)
                | EngineError::InsufficientSets
                | EngineError::DrawNotAllowed
                | EngineError::PrematureStop { .. }
                | EngineError::InvalidSetScore { .. }
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
