mod artist;
mod ids;
mod player;
mod season;

pub use artist::{Artist, CreateArtist, PerformanceRecord};
pub use ids::{ArtistId, LeagueId, PlayerId, RosterId};
pub use player::{CreatePlayer, Player};
pub use season::{SeasonDate, MAX_YEAR, MIN_YEAR};
