//! Serializable engine state
//!
//! The server persists one snapshot after every mutating request and
//! restores it at startup.

use crate::error::{HeadlinerError, Result};
use crate::league::League;
use crate::roster::Roster;
use crate::types::{LeagueId, RosterId, SeasonDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub date: SeasonDate,
    pub next_league_id: LeagueId,
    pub next_roster_id: RosterId,
    pub leagues: Vec<League>,
    pub rosters: Vec<Roster>,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check membership consistency and drop rosters no league refers to
    ///
    /// Returns the rosters keyed by id.
    pub(crate) fn into_validated(self) -> Result<ValidatedSnapshot> {
        let mut rosters: BTreeMap<RosterId, Roster> =
            self.rosters.into_iter().map(|r| (r.id(), r)).collect();
        let mut referenced = HashSet::new();

        for league in &self.leagues {
            if !league.is_member(league.owner_id()) {
                return Err(HeadlinerError::Snapshot(format!(
                    "league {} does not contain its owner",
                    league.id()
                )));
            }
            for member in league.members() {
                let roster = rosters.get(&member.roster_id).ok_or_else(|| {
                    HeadlinerError::Snapshot(format!(
                        "league {} refers to missing roster {}",
                        league.id(),
                        member.roster_id
                    ))
                })?;
                if roster.league_id() != league.id() || roster.owner_id() != member.player_id {
                    return Err(HeadlinerError::Snapshot(format!(
                        "roster {} does not belong to league {} member {}",
                        member.roster_id,
                        league.id(),
                        member.player_id
                    )));
                }
                if !referenced.insert(member.roster_id) {
                    return Err(HeadlinerError::Snapshot(format!(
                        "roster {} listed twice",
                        member.roster_id
                    )));
                }
            }
        }

        let orphans: Vec<RosterId> = rosters
            .keys()
            .filter(|id| !referenced.contains(id))
            .copied()
            .collect();
        for id in &orphans {
            tracing::warn!(roster_id = id, "Dropping roster with no league from snapshot");
            rosters.remove(id);
        }

        let max_league = self.leagues.iter().map(League::id).max().unwrap_or(0);
        let max_roster = rosters.keys().max().copied().unwrap_or(0);

        Ok(ValidatedSnapshot {
            next_league_id: self.next_league_id.max(max_league + 1),
            next_roster_id: self.next_roster_id.max(max_roster + 1),
            leagues: self.leagues,
            rosters,
        })
    }
}

pub(crate) struct ValidatedSnapshot {
    pub next_league_id: LeagueId,
    pub next_roster_id: RosterId,
    pub leagues: Vec<League>,
    pub rosters: BTreeMap<RosterId, Roster>,
}
