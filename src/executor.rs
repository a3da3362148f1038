//! One-statement execution against an injected connection.

use tracing::{debug, warn};

use crate::backend::Connection;
use crate::error::SqlWrapperError;
use crate::results::{CollectedRows, QueryOutcome, ResultSet};
use crate::types::{BindTypeSignature, ParamValue, ReturnMode};

mod helpers;

/// Runs parameterized statements on one connection and normalizes their results.
///
/// The executor owns at most one connection, supplied by the caller. Methods that talk to the
/// database take `&mut self`; sharing an executor across threads needs external locking.
///
/// ```rust
/// use sql_query_wrapper::prelude::*;
///
/// # fn main() -> Result<(), SqlWrapperError> {
/// let mut db = QueryExecutor::with_connection(SqliteConnection::open_in_memory()?);
/// db.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)", &[], ReturnMode::Result)?;
/// let id = db.insert("INSERT INTO t (name) VALUES (?)", &[ParamValue::from("a")])?;
/// let rows = db.query("SELECT name FROM t WHERE id = ?", &[ParamValue::Int(id)])?;
/// assert_eq!(rows.results[0].get("name").and_then(RowValues::as_text), Some("a"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QueryExecutor<C: Connection> {
    connection: Option<C>,
}

impl<C: Connection> Default for QueryExecutor<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connection> QueryExecutor<C> {
    /// An executor with no connection; every database call fails until one is set.
    #[must_use]
    pub fn new() -> Self {
        Self { connection: None }
    }

    #[must_use]
    pub fn with_connection(connection: C) -> Self {
        Self {
            connection: Some(connection),
        }
    }

    /// Inject the connection, returning the one it replaces.
    pub fn set_connection(&mut self, connection: C) -> Option<C> {
        self.connection.replace(connection)
    }

    #[must_use]
    pub fn connection(&self) -> Option<&C> {
        self.connection.as_ref()
    }

    pub fn connection_mut(&mut self) -> Option<&mut C> {
        self.connection.as_mut()
    }

    /// Hand the connection back to its owner.
    pub fn take_connection(&mut self) -> Option<C> {
        self.connection.take()
    }

    fn require_connection(&mut self) -> Result<&mut C, SqlWrapperError> {
        self.connection
            .as_mut()
            .ok_or(SqlWrapperError::ConnectionNotConfigured)
    }

    /// Prepare, bind, execute, and normalize one statement.
    ///
    /// Parameter values are only ever sent through the bind step; `template` reaches the
    /// backend unchanged.
    ///
    /// # Errors
    ///
    /// - `ConnectionNotConfigured` when no connection has been set.
    /// - `PrepareError` when the backend rejects the template.
    /// - `ExecutionError` when binding or running the statement fails.
    pub fn execute(
        &mut self,
        template: &str,
        params: &[ParamValue],
        mode: ReturnMode,
    ) -> Result<QueryOutcome, SqlWrapperError> {
        let conn = self.require_connection()?;
        let signature = BindTypeSignature::from_params(params);
        debug!(
            sql = template,
            params = params.len(),
            signature = %signature,
            mode = %mode,
            "executing statement"
        );

        let (result, rows_affected) = {
            let mut stmt = conn.prepare(template).map_err(|e| {
                warn!(sql = template, error = %e, "prepare failed");
                SqlWrapperError::PrepareError(e)
            })?;

            let exec_failed = |e: String| {
                warn!(sql = template, error = %e, "execution failed");
                SqlWrapperError::ExecutionError(e)
            };
            if !params.is_empty() {
                stmt.bind(&signature, params).map_err(exec_failed)?;
            }
            stmt.execute().map_err(exec_failed)?;
            let result = stmt.materialize_result().map_err(exec_failed)?;
            (result, stmt.rows_affected())
        };

        Ok(match mode {
            ReturnMode::Id => QueryOutcome::InsertId(conn.last_insert_id()),
            ReturnMode::Result => match result {
                Some(set) => QueryOutcome::Rows(set),
                None => QueryOutcome::NoResult { rows_affected },
            },
        })
    }

    /// [`execute`](Self::execute) with the return mode given by name (`"result"` or `"id"`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidReturnMode` for any other name, before the connection is used;
    /// otherwise the errors of [`execute`](Self::execute).
    pub fn execute_named(
        &mut self,
        template: &str,
        params: &[ParamValue],
        mode: &str,
    ) -> Result<QueryOutcome, SqlWrapperError> {
        let mode: ReturnMode = mode.parse()?;
        self.execute(template, params, mode)
    }

    /// Execute a row-returning statement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResultSet` if the statement produced no row set, otherwise the errors
    /// of [`execute`](Self::execute).
    pub fn query(
        &mut self,
        template: &str,
        params: &[ParamValue],
    ) -> Result<ResultSet, SqlWrapperError> {
        self.execute(template, params, ReturnMode::Result)?
            .into_result_set()
            .ok_or_else(|| SqlWrapperError::InvalidResultSet("query".to_string()))
    }

    /// Execute an INSERT and return the generated row id.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn insert(&mut self, template: &str, params: &[ParamValue]) -> Result<i64, SqlWrapperError> {
        match self.execute(template, params, ReturnMode::Id)? {
            QueryOutcome::InsertId(id) => Ok(id),
            _ => Err(SqlWrapperError::InvalidResultSet("insert".to_string())),
        }
    }

    /// Fold a row set into a map keyed by each row's `id`, or by sequential index for rows
    /// without a usable one. See [`CollectedRows`].
    #[must_use]
    pub fn collect_rows(&self, result_set: ResultSet) -> CollectedRows {
        CollectedRows::from_result_set(result_set)
    }

    /// Most recent backend diagnostic, or `""` without a connection.
    #[must_use]
    pub fn last_error(&self) -> String {
        self.connection
            .as_ref()
            .map(Connection::last_error_text)
            .unwrap_or_default()
    }
}
