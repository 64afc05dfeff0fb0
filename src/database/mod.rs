pub mod clubs;
pub mod competitors;
pub mod connection;
pub mod markers;
pub mod models;
pub mod roster;
pub mod settings;
pub mod setup;
pub mod stats;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
