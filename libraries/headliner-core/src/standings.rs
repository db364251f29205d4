//! League standings projection

use crate::types::{PlayerId, RosterId};
use serde::Serialize;

/// One row of a league table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    /// 1-based position
    pub rank: usize,
    pub player_id: PlayerId,
    pub roster_id: RosterId,
    pub points: u64,
}

/// Rank rosters by points, highest first
///
/// `entries` must be in join order; the sort is stable, so equal points
/// keep that order.
pub fn rank<I>(entries: I) -> Vec<Standing>
where
    I: IntoIterator<Item = (PlayerId, RosterId, u64)>,
{
    let mut rows: Vec<_> = entries.into_iter().collect();
    rows.sort_by(|a, b| b.2.cmp(&a.2));
    rows.into_iter()
        .enumerate()
        .map(|(index, (player_id, roster_id, points))| Standing {
            rank: index + 1,
            player_id,
            roster_id,
            points,
        })
        .collect()
}
