//! Headliner Core
//!
//! Season, league and roster engine for the Headliner fantasy music league.
//!
//! # Architecture
//!
//! - **Domain Types**: `Artist`, `Player`, `SeasonDate` and the i64 id aliases
//! - **Catalog**: the `ArtistCatalog` trait, a timeout wrapper and an
//!   in-memory fixture catalog
//! - **Engine**: `LeagueEngine` owns leagues and rosters, drives the
//!   `SeasonClock` and the monthly scoring pass
//! - **Error Handling**: unified `HeadlinerError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use headliner_core::{EngineConfig, InMemoryCatalog, LeagueEngine, SeasonClock, SeasonDate};
//! use std::sync::Arc;
//!
//! let clock = Arc::new(SeasonClock::new(SeasonDate::new(1, 2024).unwrap()));
//! let engine = LeagueEngine::new(
//!     Arc::new(InMemoryCatalog::new()),
//!     clock,
//!     EngineConfig::default(),
//! );
//! assert_eq!(engine.current_date().to_string(), "January 2024");
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod clock;
pub mod engine;
pub mod error;
pub mod league;
pub mod roster;
pub mod scoring;
pub mod snapshot;
pub mod standings;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::{projected_delta, rank_search_results, InMemoryCatalog, TimedCatalog};
pub use clock::{AdvanceGuard, SeasonClock};
pub use engine::{EngineConfig, LeagueEngine, PlayerRemoval, RosterSummary};
pub use error::{HeadlinerError, Result};
pub use league::{League, LeagueSummary, Membership, MIN_LEAGUE_NAME_LEN};
pub use roster::{PendingScore, Roster, RosterHandle, RosterSnapshot, ScoringStatus};
pub use scoring::{AdvanceReport, ReconcileReport, ScoringEngine};
pub use snapshot::EngineSnapshot;
pub use standings::Standing;
pub use traits::ArtistCatalog;
pub use types::{
    Artist, ArtistId, CreateArtist, CreatePlayer, LeagueId, PerformanceRecord, Player, PlayerId,
    RosterId, SeasonDate,
};
