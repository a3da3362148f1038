//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::backend::{Connection, Statement};
pub use crate::error::SqlWrapperError;
pub use crate::executor::QueryExecutor;
pub use crate::identifier::{Identifier, IdentifierKind, validate_identifier};
pub use crate::results::{CollectedRows, CustomDbRow, QueryOutcome, ResultSet, RowKey};
pub use crate::search::{SearchOptions, SearchQuery, build_search};
pub use crate::types::{BindType, BindTypeSignature, ParamValue, ReturnMode, RowValues};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteConnection, SqliteOptions, SqliteOptionsBuilder};
