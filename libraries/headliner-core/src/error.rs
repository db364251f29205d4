/// Core error types for Headliner
use crate::types::{ArtistId, LeagueId, PlayerId, RosterId, SeasonDate};
use thiserror::Error;

/// Result type alias using `HeadlinerError`
pub type Result<T> = std::result::Result<T, HeadlinerError>;

/// Core error type for the season engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeadlinerError {
    /// League name too short
    #[error("League name must be at least {min} characters")]
    InvalidName { min: usize },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Player already owns a roster in the league
    #[error("Player {player_id} is already a member of league {league_id}")]
    AlreadyMember {
        league_id: LeagueId,
        player_id: PlayerId,
    },

    /// Artist already on the roster
    #[error("Artist {artist_id} is already on roster {roster_id}")]
    DuplicateAssignment {
        roster_id: RosterId,
        artist_id: ArtistId,
    },

    /// The owner tried to leave their own league
    #[error("League owners cannot leave their league; transfer ownership first")]
    OwnerCannotLeave,

    /// Artist price exceeds the remaining budget
    #[error("Insufficient budget: artist costs {price}, roster has {budget} left")]
    InsufficientBudget { price: u64, budget: u64 },

    /// Artist catalog timed out or failed
    #[error("Artist catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Month advanced but some rosters could not be scored
    #[error("Scoring incomplete for {} roster(s) after advancing to {date}", rosters.len())]
    ScoringIncomplete {
        date: SeasonDate,
        rosters: Vec<RosterId>,
    },

    /// Capability exists but has no defined behavior yet
    #[error("Not implemented: {0}")]
    Unimplemented(&'static str),

    /// Snapshot (de)serialization errors
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl HeadlinerError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a catalog unavailable error
    pub fn catalog_unavailable(msg: impl Into<String>) -> Self {
        Self::CatalogUnavailable(msg.into())
    }

    /// Whether the error leaves state untouched and came from caller input
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            Self::CatalogUnavailable(_) | Self::ScoringIncomplete { .. } | Self::Snapshot(_)
        )
    }
}

impl From<serde_json::Error> for HeadlinerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}
