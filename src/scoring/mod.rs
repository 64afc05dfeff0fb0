pub mod points;
pub mod tiers;
pub mod types;

pub use points::{points_for, points_for_placement};
pub use tiers::classify;
pub use types::{PlacementField, PointsVector, Tier};
