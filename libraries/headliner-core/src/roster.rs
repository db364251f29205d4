//! Roster: one player's squad inside one league
//!
//! A roster owns a budget and an ordered set of artist assignments. The
//! invariant `budget + sum(price of held artists) == initial_budget` holds
//! as long as catalog prices do not change between add and remove.

use crate::error::{HeadlinerError, Result};
use crate::types::{Artist, ArtistId, LeagueId, PlayerId, RosterId, SeasonDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared, independently lockable roster
pub type RosterHandle = Arc<Mutex<Roster>>;

/// Whether every past period has been scored for a roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStatus {
    Complete,
    Incomplete,
}

/// A period that could not be scored yet, with the artists held at the time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingScore {
    pub period: SeasonDate,
    pub artists: Vec<ArtistId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    id: RosterId,
    league_id: LeagueId,
    owner_id: PlayerId,
    name: String,
    initial_budget: u64,
    budget: u64,
    points: u64,
    artists: Vec<ArtistId>,
    #[serde(default)]
    pending: Vec<PendingScore>,
}

/// Point-in-time view of a roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    pub id: RosterId,
    pub league_id: LeagueId,
    pub owner_id: PlayerId,
    pub name: String,
    pub budget: u64,
    pub points: u64,
    pub artists: Vec<ArtistId>,
    pub scoring_status: ScoringStatus,
}

impl Roster {
    pub fn new(
        id: RosterId,
        league_id: LeagueId,
        owner_id: PlayerId,
        name: impl Into<String>,
        starting_budget: u64,
    ) -> Self {
        Self {
            id,
            league_id,
            owner_id,
            name: name.into(),
            initial_budget: starting_budget,
            budget: starting_budget,
            points: 0,
            artists: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn id(&self) -> RosterId {
        self.id
    }

    pub fn league_id(&self) -> LeagueId {
        self.league_id
    }

    pub fn owner_id(&self) -> PlayerId {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_budget(&self) -> u64 {
        self.initial_budget
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    /// Held artists in assignment order
    pub fn artists(&self) -> &[ArtistId] {
        &self.artists
    }

    pub fn holds(&self, artist_id: ArtistId) -> bool {
        self.artists.contains(&artist_id)
    }

    pub fn pending(&self) -> &[PendingScore] {
        &self.pending
    }

    pub fn scoring_status(&self) -> ScoringStatus {
        if self.pending.is_empty() {
            ScoringStatus::Complete
        } else {
            ScoringStatus::Incomplete
        }
    }

    /// Assign an artist, debiting its price
    ///
    /// Nothing changes on failure.
    pub fn add_artist(&mut self, artist: &Artist) -> Result<RosterSnapshot> {
        if self.holds(artist.id) {
            return Err(HeadlinerError::DuplicateAssignment {
                roster_id: self.id,
                artist_id: artist.id,
            });
        }
        let remaining = self
            .budget
            .checked_sub(artist.price)
            .ok_or(HeadlinerError::InsufficientBudget {
                price: artist.price,
                budget: self.budget,
            })?;

        self.budget = remaining;
        self.artists.push(artist.id);
        Ok(self.snapshot())
    }

    /// Drop an assignment, crediting the artist's price at removal time
    pub fn remove_artist(&mut self, artist_id: ArtistId, current_price: u64) -> Result<RosterSnapshot> {
        let position = self
            .artists
            .iter()
            .position(|held| *held == artist_id)
            .ok_or_else(|| {
                HeadlinerError::not_found("Artist on roster", format!("{}/{}", self.id, artist_id))
            })?;

        self.artists.remove(position);
        self.budget = self.budget.saturating_add(current_price);
        Ok(self.snapshot())
    }

    /// Release every assignment ahead of discarding the roster
    pub fn release_all(&mut self) -> Vec<ArtistId> {
        self.pending.clear();
        std::mem::take(&mut self.artists)
    }

    pub(crate) fn credit_points(&mut self, points: u64) {
        self.points = self.points.saturating_add(points);
    }

    pub(crate) fn defer(&mut self, period: SeasonDate, artists: Vec<ArtistId>) {
        if !self.pending.iter().any(|p| p.period == period) {
            self.pending.push(PendingScore { period, artists });
        }
    }

    pub(crate) fn take_pending(&mut self) -> Vec<PendingScore> {
        std::mem::take(&mut self.pending)
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            id: self.id,
            league_id: self.league_id,
            owner_id: self.owner_id,
            name: self.name.clone(),
            budget: self.budget,
            points: self.points,
            artists: self.artists.clone(),
            scoring_status: self.scoring_status(),
        }
    }
}
