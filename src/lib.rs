//! Synchronous prepared-statement wrapper.
//!
//! - [`QueryExecutor`] runs one parameterized statement on an injected [`Connection`] and
//!   normalizes the outcome into rows, a no-result marker, or the last insert id.
//! - [`validate_identifier`] guards table/column names before they are spliced into SQL.
//! - [`build_search`] composes a relevance-ranked keyword search.
//!
//! The `sqlite` feature (on by default) provides [`SqliteConnection`](sqlite::SqliteConnection).

pub mod backend;
pub mod error;
pub mod executor;
pub mod identifier;
pub mod prelude;
pub mod results;
pub mod search;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use backend::{Connection, Statement};
pub use error::SqlWrapperError;
pub use executor::QueryExecutor;
pub use identifier::{Identifier, IdentifierKind, validate_identifier};
pub use results::{CollectedRows, CustomDbRow, QueryOutcome, ResultSet, RowKey};
pub use search::{SearchOptions, SearchQuery, build_search};
pub use types::{BindType, BindTypeSignature, ParamValue, ReturnMode, RowValues};
