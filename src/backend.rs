//! The interface a database session has to offer to [`QueryExecutor`](crate::QueryExecutor).
//!
//! Implementations report failures as plain diagnostic text; the executor decides whether a
//! failure is a prepare error or an execution error.

use crate::results::ResultSet;
use crate::types::{BindTypeSignature, ParamValue};

/// Backend diagnostic text for a failed call.
pub type Diagnostic = String;

/// One live database session.
pub trait Connection {
    /// Parse `template` into a statement with positional placeholders.
    ///
    /// # Errors
    ///
    /// Returns the backend's diagnostic when the template is malformed.
    fn prepare<'c>(&'c mut self, template: &str) -> Result<Box<dyn Statement + 'c>, Diagnostic>;

    /// Row id generated by the most recent successful INSERT on this session.
    fn last_insert_id(&self) -> i64;

    /// Diagnostic of the most recent failed call, or the empty string.
    fn last_error_text(&self) -> String;
}

/// A prepared statement borrowed from its [`Connection`].
pub trait Statement {
    /// Bind every value positionally in one call. `signature` has one entry per value.
    ///
    /// # Errors
    ///
    /// Returns the backend's diagnostic when a value cannot be bound (for example when
    /// there are more values than placeholders).
    fn bind(&mut self, signature: &BindTypeSignature, values: &[ParamValue])
    -> Result<(), Diagnostic>;

    /// Run the statement.
    ///
    /// # Errors
    ///
    /// Returns the backend's diagnostic on runtime failures such as constraint violations.
    fn execute(&mut self) -> Result<(), Diagnostic>;

    /// Rows produced by the last `execute`, or `None` for statements without a row set.
    ///
    /// # Errors
    ///
    /// Returns the backend's diagnostic when the rows cannot be read.
    fn materialize_result(&mut self) -> Result<Option<ResultSet>, Diagnostic>;

    /// Rows changed by the last `execute` of a statement without a row set.
    fn rows_affected(&self) -> usize {
        0
    }
}
