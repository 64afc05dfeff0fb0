pub mod awards;
pub mod context;
pub mod processing;
pub mod registration;
pub mod standings;

pub use processing::{BatchReport, ResultProcessor, TournamentOutcome, TournamentState};
