/// Player domain type
use super::PlayerId;
use serde::{Deserialize, Serialize};

/// Player account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player identifier
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Login name, unique across players
    pub username: String,

    /// Account creation timestamp (ISO string)
    pub created_at: String,
}

/// Data for creating a new player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayer {
    pub name: String,
    pub username: String,
}
