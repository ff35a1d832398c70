pub mod connection;
pub mod types;

pub use connection::PgConnection;
pub use types::*;
