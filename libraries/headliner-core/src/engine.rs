//! League engine - concurrent orchestration of leagues, rosters and the season
//!
//! # Locking
//!
//! - Registries (`leagues`, `rosters`) sit behind short-lived std locks and
//!   are never held across an await.
//! - Each league and each roster has its own async mutex. Membership changes
//!   serialize on the league; budget changes serialize on the roster.
//! - Lock order is league, then roster. A roster lock is never held while
//!   taking a league lock.
//! - Month transitions serialize on the season clock (see [`ScoringEngine`]).

use crate::catalog::TimedCatalog;
use crate::clock::SeasonClock;
use crate::error::{HeadlinerError, Result};
use crate::league::{League, LeagueSummary};
use crate::roster::{Roster, RosterHandle, RosterSnapshot, ScoringStatus};
use crate::scoring::{AdvanceReport, ReconcileReport, ScoringEngine};
use crate::snapshot::EngineSnapshot;
use crate::standings::{self, Standing};
use crate::traits::ArtistCatalog;
use crate::types::{Artist, ArtistId, LeagueId, PlayerId, RosterId, SeasonDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;

type LeagueHandle = Arc<Mutex<League>>;

/// Engine tuning, usually taken from the server's `[season]` config section
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Budget every new roster starts with
    pub starting_budget: u64,
    /// Upper bound on any single catalog call
    pub catalog_timeout: Duration,
    /// Result cap for artist search when the caller gives none
    pub search_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_budget: 1000,
            catalog_timeout: Duration::from_secs(2),
            search_limit: 25,
        }
    }
}

/// Roster listing entry for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub roster_id: RosterId,
    pub roster_name: String,
    pub league_id: LeagueId,
    pub league_name: String,
    pub budget: u64,
    pub points: u64,
    pub scoring_status: ScoringStatus,
}

/// What removing a player took with it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRemoval {
    pub deleted_leagues: Vec<LeagueId>,
    pub released_rosters: Vec<RosterId>,
}

pub struct LeagueEngine {
    config: EngineConfig,
    catalog: TimedCatalog,
    scoring: ScoringEngine,
    leagues: RwLock<BTreeMap<LeagueId, LeagueHandle>>,
    rosters: RwLock<BTreeMap<RosterId, RosterHandle>>,
    next_league_id: AtomicI64,
    next_roster_id: AtomicI64,
}

impl LeagueEngine {
    /// An empty engine driven by `clock`
    pub fn new(
        catalog: Arc<dyn ArtistCatalog>,
        clock: Arc<SeasonClock>,
        config: EngineConfig,
    ) -> Self {
        let catalog = TimedCatalog::new(catalog, config.catalog_timeout);
        Self {
            scoring: ScoringEngine::new(catalog.clone(), clock),
            catalog,
            config,
            leagues: RwLock::new(BTreeMap::new()),
            rosters: RwLock::new(BTreeMap::new()),
            next_league_id: AtomicI64::new(1),
            next_roster_id: AtomicI64::new(1),
        }
    }

    /// Rebuild an engine from a persisted snapshot
    ///
    /// The clock is built by the caller, normally from `snapshot.date`.
    pub fn restore(
        catalog: Arc<dyn ArtistCatalog>,
        clock: Arc<SeasonClock>,
        config: EngineConfig,
        snapshot: EngineSnapshot,
    ) -> Result<Self> {
        let state = snapshot.into_validated()?;
        let engine = Self::new(catalog, clock, config);
        engine
            .next_league_id
            .store(state.next_league_id, Ordering::SeqCst);
        engine
            .next_roster_id
            .store(state.next_roster_id, Ordering::SeqCst);
        {
            let mut rosters = engine.rosters_mut();
            for (id, roster) in state.rosters {
                rosters.insert(id, Arc::new(Mutex::new(roster)));
            }
        }
        {
            let mut leagues = engine.leagues_mut();
            for league in state.leagues {
                leagues.insert(league.id(), Arc::new(Mutex::new(league)));
            }
        }
        tracing::info!(
            leagues = engine.league_handles().len(),
            rosters = engine.roster_handles().len(),
            "Engine state restored"
        );
        Ok(engine)
    }

    /// Capture the full engine state
    ///
    /// Holds the advance lock and every league lock while reading, so the
    /// snapshot never shows half a scoring pass or half a membership change.
    pub async fn snapshot(&self) -> EngineSnapshot {
        let guard = self.scoring.clock().lock().await;

        let league_handles = self.league_handles();
        let mut league_guards = Vec::with_capacity(league_handles.len());
        for handle in &league_handles {
            league_guards.push(handle.lock().await);
        }
        // A league deleted while we queued for its lock has already lost its rosters
        let leagues: Vec<League> = league_handles
            .iter()
            .zip(&league_guards)
            .filter(|(handle, league)| self.ensure_league_live(league.id(), handle).is_ok())
            .map(|(_, league)| (**league).clone())
            .collect();

        let mut rosters = Vec::new();
        for handle in self.roster_handles() {
            rosters.push(handle.lock().await.clone());
        }
        drop(league_guards);

        EngineSnapshot {
            date: guard.current(),
            next_league_id: self.next_league_id.load(Ordering::SeqCst),
            next_roster_id: self.next_roster_id.load(Ordering::SeqCst),
            leagues,
            rosters,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<SeasonClock> {
        self.scoring.clock()
    }

    pub fn current_date(&self) -> SeasonDate {
        self.scoring.clock().current()
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn search_artists(&self, term: &str, limit: Option<usize>) -> Result<Vec<Artist>> {
        let limit = limit.unwrap_or(self.config.search_limit);
        if limit == 0 {
            return Err(HeadlinerError::invalid_input("limit must be positive"));
        }
        self.catalog.search(term, limit).await
    }

    pub async fn artist(&self, id: ArtistId) -> Result<Artist> {
        self.catalog.get(id).await
    }

    // ========================================================================
    // Leagues
    // ========================================================================

    /// Create a league together with its owner's roster
    ///
    /// The roster is registered before the league, so a registered league
    /// always has at least one roster.
    pub async fn create_league(&self, name: &str, owner_id: PlayerId) -> Result<LeagueSummary> {
        let name = League::validate_name(name)?;
        let league_id = self.next_league_id.fetch_add(1, Ordering::SeqCst);
        let roster_id = self.next_roster_id.fetch_add(1, Ordering::SeqCst);

        let roster = Roster::new(
            roster_id,
            league_id,
            owner_id,
            League::roster_name(&name),
            self.config.starting_budget,
        );
        let league = League::new(league_id, name, owner_id, roster_id);
        let summary = league.summary();

        self.rosters_mut()
            .insert(roster_id, Arc::new(Mutex::new(roster)));
        self.leagues_mut()
            .insert(league_id, Arc::new(Mutex::new(league)));

        tracing::info!(league_id, owner_id, name = %summary.name, "League created");
        Ok(summary)
    }

    pub async fn join_league(&self, league_id: LeagueId, player_id: PlayerId) -> Result<RosterSnapshot> {
        let handle = self.league_handle(league_id)?;
        let mut league = handle.lock().await;
        self.ensure_league_live(league_id, &handle)?;
        league.ensure_not_member(player_id)?;

        let roster_id = self.next_roster_id.fetch_add(1, Ordering::SeqCst);
        let roster = Roster::new(
            roster_id,
            league_id,
            player_id,
            League::roster_name(league.name()),
            self.config.starting_budget,
        );
        let snapshot = roster.snapshot();

        self.rosters_mut()
            .insert(roster_id, Arc::new(Mutex::new(roster)));
        league.admit(player_id, roster_id)?;

        tracing::info!(league_id, player_id, roster_id, "Player joined league");
        Ok(snapshot)
    }

    pub async fn leave_league(&self, league_id: LeagueId, player_id: PlayerId) -> Result<()> {
        let handle = self.league_handle(league_id)?;
        let mut league = handle.lock().await;
        self.ensure_league_live(league_id, &handle)?;

        let roster_id = league.release(player_id)?;
        self.discard_roster(roster_id).await;

        tracing::info!(league_id, player_id, roster_id, "Player left league");
        Ok(())
    }

    /// Ownership transfer has no defined rules yet and always fails
    pub async fn transfer_ownership(&self, league_id: LeagueId, new_owner: PlayerId) -> Result<()> {
        let handle = self.league_handle(league_id)?;
        let mut league = handle.lock().await;
        league.transfer_ownership(new_owner)
    }

    pub async fn leagues(&self) -> Vec<LeagueSummary> {
        let mut summaries = Vec::new();
        for handle in self.league_handles() {
            summaries.push(handle.lock().await.summary());
        }
        summaries
    }

    pub async fn league(&self, league_id: LeagueId) -> Result<LeagueSummary> {
        let handle = self.league_handle(league_id)?;
        let league = handle.lock().await;
        Ok(league.summary())
    }

    /// Rosters of a league ranked by points, ties in join order
    pub async fn standings(&self, league_id: LeagueId) -> Result<Vec<Standing>> {
        let handle = self.league_handle(league_id)?;
        let league = handle.lock().await;

        let mut entries = Vec::with_capacity(league.member_count());
        for member in league.members() {
            let roster = self.roster_handle(member.roster_id)?;
            let points = roster.lock().await.points();
            entries.push((member.player_id, member.roster_id, points));
        }
        Ok(standings::rank(entries))
    }

    /// Drop everything a deleted player held
    ///
    /// Leagues the player owns are deleted outright with all their rosters;
    /// in other leagues only the player's roster goes.
    pub async fn remove_player(&self, player_id: PlayerId) -> PlayerRemoval {
        let mut removal = PlayerRemoval::default();

        for handle in self.league_handles() {
            let mut league = handle.lock().await;
            let league_id = league.id();
            if self.ensure_league_live(league_id, &handle).is_err() {
                continue;
            }

            if league.owner_id() == player_id {
                self.leagues_mut().remove(&league_id);
                for member in league.members() {
                    self.discard_roster(member.roster_id).await;
                    removal.released_rosters.push(member.roster_id);
                }
                removal.deleted_leagues.push(league_id);
                tracing::info!(league_id, player_id, "League deleted with its owner");
            } else if let Ok(roster_id) = league.release(player_id) {
                self.discard_roster(roster_id).await;
                removal.released_rosters.push(roster_id);
            }
        }

        removal
    }

    // ========================================================================
    // Rosters
    // ========================================================================

    pub async fn roster(&self, roster_id: RosterId) -> Result<RosterSnapshot> {
        let handle = self.roster_handle(roster_id)?;
        let roster = handle.lock().await;
        Ok(roster.snapshot())
    }

    pub async fn rosters_for_player(&self, player_id: PlayerId) -> Vec<RosterSummary> {
        let mut owned = Vec::new();
        for handle in self.roster_handles() {
            let roster = handle.lock().await;
            if roster.owner_id() == player_id {
                owned.push(roster.snapshot());
            }
        }

        let mut summaries = Vec::with_capacity(owned.len());
        for roster in owned {
            let Ok(league) = self.league_handle(roster.league_id) else {
                continue;
            };
            let league_name = league.lock().await.name().to_string();
            summaries.push(RosterSummary {
                roster_id: roster.id,
                roster_name: roster.name,
                league_id: roster.league_id,
                league_name,
                budget: roster.budget,
                points: roster.points,
                scoring_status: roster.scoring_status,
            });
        }
        summaries
    }

    /// Held artists with current catalog metadata, in assignment order
    pub async fn roster_artists(&self, roster_id: RosterId) -> Result<Vec<Artist>> {
        let artist_ids = self.roster(roster_id).await?.artists;
        let mut artists = Vec::with_capacity(artist_ids.len());
        for id in artist_ids {
            match self.catalog.get(id).await {
                Ok(artist) => artists.push(artist),
                Err(HeadlinerError::NotFound { .. }) => {
                    tracing::warn!(roster_id, artist_id = id, "Held artist missing from catalog");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(artists)
    }

    /// Draft an artist onto a roster at its current catalog price
    pub async fn add_artist(&self, roster_id: RosterId, artist_id: ArtistId) -> Result<RosterSnapshot> {
        let handle = self.roster_handle(roster_id)?;
        let mut roster = handle.lock().await;
        self.ensure_roster_live(roster_id, &handle)?;

        if roster.holds(artist_id) {
            return Err(HeadlinerError::DuplicateAssignment {
                roster_id,
                artist_id,
            });
        }
        let artist = self.catalog.get(artist_id).await?;
        let snapshot = roster.add_artist(&artist)?;

        tracing::debug!(
            roster_id,
            artist_id,
            price = artist.price,
            budget = snapshot.budget,
            "Artist added to roster"
        );
        Ok(snapshot)
    }

    /// Release an artist, refunding its price as the catalog quotes it now
    pub async fn remove_artist(&self, roster_id: RosterId, artist_id: ArtistId) -> Result<RosterSnapshot> {
        let handle = self.roster_handle(roster_id)?;
        let mut roster = handle.lock().await;
        self.ensure_roster_live(roster_id, &handle)?;

        if !roster.holds(artist_id) {
            return Err(HeadlinerError::not_found(
                "Artist on roster",
                format!("{roster_id}/{artist_id}"),
            ));
        }
        let refund = match self.catalog.get(artist_id).await {
            Ok(artist) => artist.price,
            Err(HeadlinerError::NotFound { .. }) => {
                tracing::warn!(roster_id, artist_id, "Removing artist no longer in catalog, no refund");
                0
            }
            Err(err) => return Err(err),
        };
        let snapshot = roster.remove_artist(artist_id, refund)?;

        tracing::debug!(roster_id, artist_id, refund, budget = snapshot.budget, "Artist removed from roster");
        Ok(snapshot)
    }

    /// Delete a roster, dropping its member slot from the league
    ///
    /// Same rules as leaving: the owner's roster cannot be deleted.
    pub async fn delete_roster(&self, roster_id: RosterId) -> Result<()> {
        let (league_id, owner_id) = {
            let handle = self.roster_handle(roster_id)?;
            let roster = handle.lock().await;
            (roster.league_id(), roster.owner_id())
        };
        self.leave_league(league_id, owner_id).await
    }

    // ========================================================================
    // Season
    // ========================================================================

    /// Advance the season one month and score every roster
    pub async fn advance_month(&self) -> AdvanceReport {
        self.scoring.advance(|| self.roster_handles()).await
    }

    /// Retry scoring for rosters left incomplete by earlier advances
    pub async fn reconcile(&self) -> ReconcileReport {
        self.scoring.reconcile(self.roster_handles()).await
    }

    // ========================================================================
    // Registry helpers
    // ========================================================================

    fn leagues_mut(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<LeagueId, LeagueHandle>> {
        self.leagues.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn rosters_mut(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<RosterId, RosterHandle>> {
        self.rosters.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn league_handles(&self) -> Vec<LeagueHandle> {
        self.leagues
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    fn roster_handles(&self) -> Vec<RosterHandle> {
        self.rosters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    fn league_handle(&self, league_id: LeagueId) -> Result<LeagueHandle> {
        self.leagues
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&league_id)
            .cloned()
            .ok_or_else(|| HeadlinerError::not_found("League", league_id))
    }

    fn roster_handle(&self, roster_id: RosterId) -> Result<RosterHandle> {
        self.rosters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&roster_id)
            .cloned()
            .ok_or_else(|| HeadlinerError::not_found("Roster", roster_id))
    }

    /// The league may have been deleted while we waited for its lock
    fn ensure_league_live(&self, league_id: LeagueId, handle: &LeagueHandle) -> Result<()> {
        match self.league_handle(league_id) {
            Ok(current) if Arc::ptr_eq(&current, handle) => Ok(()),
            _ => Err(HeadlinerError::not_found("League", league_id)),
        }
    }

    /// The roster may have been discarded while we waited for its lock
    fn ensure_roster_live(&self, roster_id: RosterId, handle: &RosterHandle) -> Result<()> {
        match self.roster_handle(roster_id) {
            Ok(current) if Arc::ptr_eq(&current, handle) => Ok(()),
            _ => Err(HeadlinerError::not_found("Roster", roster_id)),
        }
    }

    async fn discard_roster(&self, roster_id: RosterId) {
        let removed = self.rosters_mut().remove(&roster_id);
        if let Some(handle) = removed {
            let released = handle.lock().await.release_all();
            tracing::debug!(roster_id, artists = released.len(), "Roster discarded");
        }
    }
}
