use thiserror::Error;

use crate::identifier::IdentifierKind;

#[derive(Debug, Error)]
pub enum SqlWrapperError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Database connection not set; inject one with set_connection() or with_connection()")]
    ConnectionNotConfigured,

    #[error("Connection failed: {0}")]
    ConnectFailed(String),

    #[error("Failed to prepare query: {0}")]
    PrepareError(String),

    #[error("Query execution failed: {0}")]
    ExecutionError(String),

    #[error("Invalid return type specified for execute: {0}")]
    InvalidReturnMode(String),

    #[error(
        "Invalid {kind} name: {value:?}. Must be non-empty, start with a letter or underscore, and contain only alphanumeric characters and underscores."
    )]
    InvalidIdentifier { kind: IdentifierKind, value: String },

    #[error("{0} did not return a valid result set")]
    InvalidResultSet(String),
}

pub type Result<T> = std::result::Result<T, SqlWrapperError>;
