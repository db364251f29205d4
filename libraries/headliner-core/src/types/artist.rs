//! Artist types

use super::ArtistId;
use serde::{Deserialize, Serialize};

/// An artist available for drafting
///
/// Catalog entries are read-only to the engine. Prices are unsigned so a
/// negative price cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub price: u64,
    pub listeners: u64,
    /// Popularity score, 0-100
    pub popularity: u32,
}

/// Data for importing a new artist into the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtist {
    pub name: String,
    pub price: u64,
    pub listeners: u64,
    pub popularity: u32,
    /// Explicit monthly results; months without one use the projected delta
    #[serde(default)]
    pub performance: Vec<PerformanceRecord>,
}

/// Points an artist earned in one simulated month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub year: i32,
    pub month: u8,
    pub points: u64,
}
