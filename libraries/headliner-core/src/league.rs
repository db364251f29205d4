//! League membership rules
//!
//! A league always contains its owner's roster, and each player holds at
//! most one roster per league. Members are kept in join order, which is
//! also the standings tie-break order.

use crate::error::{HeadlinerError, Result};
use crate::types::{LeagueId, PlayerId, RosterId};
use serde::{Deserialize, Serialize};

/// Shortest accepted league name, in characters after trimming
pub const MIN_LEAGUE_NAME_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub player_id: PlayerId,
    pub roster_id: RosterId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    id: LeagueId,
    name: String,
    owner_id: PlayerId,
    members: Vec<Membership>,
}

/// League listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSummary {
    pub id: LeagueId,
    pub name: String,
    pub owner_id: PlayerId,
    /// Member player ids in join order, owner included
    pub members: Vec<PlayerId>,
}

impl League {
    /// Trim and check a proposed league name
    pub fn validate_name(name: &str) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.chars().count() < MIN_LEAGUE_NAME_LEN {
            return Err(HeadlinerError::InvalidName {
                min: MIN_LEAGUE_NAME_LEN,
            });
        }
        Ok(trimmed.to_string())
    }

    /// Name given to rosters created in this league
    pub fn roster_name(league_name: &str) -> String {
        format!("{league_name} Roster")
    }

    /// A new league whose first member is the owner's roster
    pub(crate) fn new(
        id: LeagueId,
        name: String,
        owner_id: PlayerId,
        owner_roster: RosterId,
    ) -> Self {
        Self {
            id,
            name,
            owner_id,
            members: vec![Membership {
                player_id: owner_id,
                roster_id: owner_roster,
            }],
        }
    }

    pub fn id(&self) -> LeagueId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_id(&self) -> PlayerId {
        self.owner_id
    }

    pub fn members(&self) -> &[Membership] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn roster_of(&self, player_id: PlayerId) -> Option<RosterId> {
        self.members
            .iter()
            .find(|m| m.player_id == player_id)
            .map(|m| m.roster_id)
    }

    pub fn is_member(&self, player_id: PlayerId) -> bool {
        self.roster_of(player_id).is_some()
    }

    /// Fail with `AlreadyMember` if the player has a roster here
    pub fn ensure_not_member(&self, player_id: PlayerId) -> Result<()> {
        if self.is_member(player_id) {
            return Err(HeadlinerError::AlreadyMember {
                league_id: self.id,
                player_id,
            });
        }
        Ok(())
    }

    pub(crate) fn admit(&mut self, player_id: PlayerId, roster_id: RosterId) -> Result<()> {
        self.ensure_not_member(player_id)?;
        self.members.push(Membership {
            player_id,
            roster_id,
        });
        Ok(())
    }

    /// Check that `player_id` may leave, returning their roster
    pub fn departing_roster(&self, player_id: PlayerId) -> Result<RosterId> {
        if player_id == self.owner_id {
            return Err(HeadlinerError::OwnerCannotLeave);
        }
        self.roster_of(player_id).ok_or_else(|| {
            HeadlinerError::not_found("League member", format!("{}/{}", self.id, player_id))
        })
    }

    pub(crate) fn release(&mut self, player_id: PlayerId) -> Result<RosterId> {
        let roster_id = self.departing_roster(player_id)?;
        self.members.retain(|m| m.player_id != player_id);
        Ok(roster_id)
    }

    /// Hand the league to another member
    ///
    /// No succession rule exists yet, so this always fails and the owner
    /// stays a member.
    pub fn transfer_ownership(&mut self, _new_owner: PlayerId) -> Result<()> {
        Err(HeadlinerError::Unimplemented("league ownership transfer"))
    }

    pub fn summary(&self) -> LeagueSummary {
        LeagueSummary {
            id: self.id,
            name: self.name.clone(),
            owner_id: self.owner_id,
            members: self.members.iter().map(|m| m.player_id).collect(),
        }
    }
}
