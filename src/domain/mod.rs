pub mod identity;
pub mod models;
pub mod progress;
pub mod roster;

pub use identity::normalize_competitor_id;
pub use models::{ParticipantRow, Tournament};
pub use progress::BatchProgress;
pub use roster::{ClubRef, RosterEntry, RosterIndex};
