//! Monthly scoring pass
//!
//! Advancing the season commits the new month first and scores rosters
//! second. A roster whose deltas cannot be fetched keeps a pending entry
//! and is settled on the next advance or by [`ScoringEngine::reconcile`].

use crate::catalog::TimedCatalog;
use crate::clock::SeasonClock;
use crate::error::{HeadlinerError, Result};
use crate::roster::{PendingScore, Roster, RosterHandle};
use crate::traits::ArtistCatalog;
use crate::types::{RosterId, SeasonDate};
use futures_util::future::{join_all, try_join_all};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of one month transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceReport {
    pub date: SeasonDate,
    pub scored_rosters: usize,
    pub incomplete_rosters: Vec<RosterId>,
}

impl AdvanceReport {
    pub fn is_complete(&self) -> bool {
        self.incomplete_rosters.is_empty()
    }

    /// The new date, or `ScoringIncomplete` if any roster is behind
    pub fn into_result(self) -> Result<SeasonDate> {
        if self.is_complete() {
            Ok(self.date)
        } else {
            Err(HeadlinerError::ScoringIncomplete {
                date: self.date,
                rosters: self.incomplete_rosters,
            })
        }
    }
}

/// Outcome of a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub reconciled: Vec<RosterId>,
    pub still_incomplete: Vec<RosterId>,
}

pub struct ScoringEngine {
    catalog: TimedCatalog,
    clock: Arc<SeasonClock>,
}

impl ScoringEngine {
    pub fn new(catalog: TimedCatalog, clock: Arc<SeasonClock>) -> Self {
        Self { catalog, clock }
    }

    pub fn clock(&self) -> &Arc<SeasonClock> {
        &self.clock
    }

    /// Move the clock one month and score every roster for it
    ///
    /// `rosters` is called after the new month is committed, while the
    /// advance lock is still held.
    pub async fn advance<F>(&self, rosters: F) -> AdvanceReport
    where
        F: FnOnce() -> Vec<RosterHandle>,
    {
        let mut guard = self.clock.lock().await;
        let date = guard.advance();
        tracing::info!(%date, "Season advanced");

        let handles = rosters();
        let outcomes = join_all(handles.iter().map(|handle| async move {
            let mut roster = handle.lock().await;
            let complete = self.settle(&mut roster, Some(date)).await;
            (roster.id(), complete)
        }))
        .await;
        drop(guard);

        let scored_rosters = outcomes.len();
        let incomplete_rosters: Vec<RosterId> = outcomes
            .into_iter()
            .filter_map(|(id, complete)| (!complete).then_some(id))
            .collect();

        if incomplete_rosters.is_empty() {
            tracing::info!(%date, scored_rosters, "Scoring pass complete");
        } else {
            tracing::warn!(
                %date,
                incomplete = incomplete_rosters.len(),
                "Scoring pass incomplete, rosters deferred"
            );
        }

        AdvanceReport {
            date,
            scored_rosters,
            incomplete_rosters,
        }
    }

    /// Settle pending periods without moving the clock
    ///
    /// Safe to call repeatedly: settled periods are dropped from the
    /// roster, so nothing is credited twice.
    pub async fn reconcile(&self, rosters: Vec<RosterHandle>) -> ReconcileReport {
        let _guard = self.clock.lock().await;

        let outcomes = join_all(rosters.iter().map(|handle| async move {
            let mut roster = handle.lock().await;
            if roster.pending().is_empty() {
                return None;
            }
            let complete = self.settle(&mut roster, None).await;
            Some((roster.id(), complete))
        }))
        .await;

        let mut report = ReconcileReport::default();
        for (id, complete) in outcomes.into_iter().flatten() {
            if complete {
                report.reconciled.push(id);
            } else {
                report.still_incomplete.push(id);
            }
        }
        tracing::info!(
            reconciled = report.reconciled.len(),
            still_incomplete = report.still_incomplete.len(),
            "Reconciliation finished"
        );
        report
    }

    /// Score pending periods, then `period`, against the roster
    ///
    /// Each period's points are summed before being credited, so a roster
    /// never shows part of a month. After the first catalog failure the
    /// remaining periods are deferred without further lookups.
    async fn settle(&self, roster: &mut Roster, period: Option<SeasonDate>) -> bool {
        let mut queue = roster.take_pending();
        if let Some(period) = period {
            queue.push(PendingScore {
                period,
                artists: roster.artists().to_vec(),
            });
        }

        let mut reachable = true;
        for entry in queue {
            if !reachable {
                roster.defer(entry.period, entry.artists);
                continue;
            }
            match self.period_total(&entry).await {
                Ok(points) => {
                    roster.credit_points(points);
                    tracing::debug!(
                        roster_id = roster.id(),
                        period = %entry.period,
                        points,
                        "Roster scored"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        roster_id = roster.id(),
                        period = %entry.period,
                        error = %err,
                        "Deferring roster score"
                    );
                    reachable = false;
                    roster.defer(entry.period, entry.artists);
                }
            }
        }
        reachable
    }

    /// Sum of deltas for one pending entry
    ///
    /// Artists that have left the catalog contribute nothing; any other
    /// failure aborts the whole period.
    async fn period_total(&self, entry: &PendingScore) -> Result<u64> {
        let deltas = try_join_all(entry.artists.iter().map(|&artist_id| async move {
            match self.catalog.performance_delta(artist_id, entry.period).await {
                Err(HeadlinerError::NotFound { .. }) => {
                    tracing::warn!(artist_id, "Scored artist missing from catalog");
                    Ok(0)
                }
                other => other,
            }
        }))
        .await?;
        Ok(deltas.into_iter().fold(0u64, u64::saturating_add))
    }
}
