use std::fmt;

use tracing::{debug, trace};

use crate::backend::{Connection, Diagnostic, Statement};
use crate::error::SqlWrapperError;
use crate::results::ResultSet;
use crate::types::{BindTypeSignature, ParamValue};

use super::config::{MEMORY_PATH, SqliteOptions};
use super::functions::register_functions;
use super::params::{convert_params, sqlite_storage_class};
use super::query::build_result_set;

/// A single `SQLite` session implementing [`Connection`].
pub struct SqliteConnection {
    conn: rusqlite::Connection,
    last_error: String,
}

impl SqliteConnection {
    /// Open a database described by `options`.
    ///
    /// # Errors
    ///
    /// Returns `SqlWrapperError::ConnectFailed` if the file cannot be opened or the session
    /// setup (function registration, pragmas) fails.
    pub fn open(options: &SqliteOptions) -> Result<Self, SqlWrapperError> {
        let connect_failed =
            |e: rusqlite::Error| SqlWrapperError::ConnectFailed(format!("{}: {e}", options.db_path));

        let opened = if options.db_path == MEMORY_PATH {
            rusqlite::Connection::open_in_memory()
        } else {
            rusqlite::Connection::open(&options.db_path)
        };
        let conn = opened.map_err(connect_failed)?;

        register_functions(&conn).map_err(connect_failed)?;
        let pragma = if options.case_sensitive_like {
            "PRAGMA case_sensitive_like = ON;"
        } else {
            "PRAGMA case_sensitive_like = OFF;"
        };
        conn.execute_batch(pragma).map_err(connect_failed)?;
        if let Some(timeout) = options.busy_timeout {
            conn.busy_timeout(timeout).map_err(connect_failed)?;
        }

        debug!(db_path = %options.db_path, "opened sqlite connection");
        Ok(Self {
            conn,
            last_error: String::new(),
        })
    }

    /// Open a private in-memory database with default options.
    ///
    /// # Errors
    ///
    /// Returns `SqlWrapperError::ConnectFailed` if `SQLite` cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, SqlWrapperError> {
        Self::open(&SqliteOptions::in_memory())
    }

    /// Borrow the underlying rusqlite connection.
    #[must_use]
    pub fn raw(&self) -> &rusqlite::Connection {
        &self.conn
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("conn", &self.conn)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl Connection for SqliteConnection {
    fn prepare<'c>(&'c mut self, template: &str) -> Result<Box<dyn Statement + 'c>, Diagnostic> {
        let SqliteConnection { conn, last_error } = self;
        last_error.clear();
        match conn.prepare(template) {
            Ok(stmt) => Ok(Box::new(SqliteStatement {
                stmt,
                last_error,
                bound: 0,
                result: None,
                rows_affected: 0,
            })),
            Err(e) => Err(record(last_error, &e)),
        }
    }

    fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    fn last_error_text(&self) -> String {
        self.last_error.clone()
    }
}

/// A prepared statement that writes its failures back to the owning connection.
struct SqliteStatement<'c> {
    stmt: rusqlite::Statement<'c>,
    last_error: &'c mut String,
    bound: usize,
    result: Option<ResultSet>,
    rows_affected: usize,
}

fn record(last_error: &mut String, err: &dyn fmt::Display) -> Diagnostic {
    let msg = err.to_string();
    last_error.clone_from(&msg);
    msg
}

impl Statement for SqliteStatement<'_> {
    fn bind(
        &mut self,
        signature: &BindTypeSignature,
        values: &[ParamValue],
    ) -> Result<(), Diagnostic> {
        let expected = self.stmt.parameter_count();
        if values.len() != expected {
            let msg = format!("statement expects {expected} parameters, {} supplied", values.len());
            return Err(record(self.last_error, &msg));
        }
        let converted = convert_params(signature, values).map_err(|e| record(self.last_error, &e))?;
        for (idx, value) in converted.into_iter().enumerate() {
            trace!(
                index = idx + 1,
                storage = sqlite_storage_class(signature.types()[idx]),
                "binding parameter"
            );
            self.stmt
                .raw_bind_parameter(idx + 1, value)
                .map_err(|e| record(self.last_error, &e))?;
        }
        self.bound = values.len();
        Ok(())
    }

    fn execute(&mut self) -> Result<(), Diagnostic> {
        let expected = self.stmt.parameter_count();
        if self.bound != expected {
            let msg = format!("statement expects {expected} parameters, {} bound", self.bound);
            return Err(record(self.last_error, &msg));
        }

        if self.stmt.column_count() == 0 {
            let changed = self
                .stmt
                .raw_execute()
                .map_err(|e| record(self.last_error, &e))?;
            self.rows_affected = changed;
            self.result = None;
        } else {
            let set = build_result_set(&mut self.stmt).map_err(|e| record(self.last_error, &e))?;
            self.rows_affected = 0;
            self.result = Some(set);
        }
        Ok(())
    }

    fn materialize_result(&mut self) -> Result<Option<ResultSet>, Diagnostic> {
        Ok(self.result.take())
    }

    fn rows_affected(&self) -> usize {
        self.rows_affected
    }
}
