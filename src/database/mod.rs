pub mod connection;
pub mod ledger;
pub mod matches;
pub mod models;
pub mod players;
pub mod setup;

pub use connection::{begin_write, create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
