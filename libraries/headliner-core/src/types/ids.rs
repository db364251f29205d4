//! Identifier types
//!
//! Every entity is keyed by a SQLite-style integer row id.

/// Player (account) identifier
pub type PlayerId = i64;

/// League identifier
pub type LeagueId = i64;

/// Roster identifier
pub type RosterId = i64;

/// Artist identifier
pub type ArtistId = i64;
