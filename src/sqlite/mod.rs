// SQLite module - the bundled `Connection` implementation
//
// - config: open options and builder
// - connection: session + prepared statement adapters
// - functions: scalar functions registered on every session
// - params: bind parameter conversion
// - query: row extraction and result set building

pub mod config;
pub mod connection;
pub mod functions;
pub mod params;
pub mod query;

pub use config::{MEMORY_PATH, SqliteOptions, SqliteOptionsBuilder};
pub use connection::SqliteConnection;
pub use params::convert_params;
pub use query::build_result_set;
