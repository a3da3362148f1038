use std::time::Duration;

use serde::Deserialize;

use crate::error::SqlWrapperError;

use super::connection::SqliteConnection;

/// Path that opens a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Options for opening a `SQLite` connection.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteOptions {
    pub db_path: String,
    /// Make `LIKE` compare ASCII case-sensitively, so case-sensitive search terms are exact.
    #[serde(default = "default_case_sensitive_like")]
    pub case_sensitive_like: bool,
    #[serde(default, with = "duration_ms")]
    pub busy_timeout: Option<Duration>,
}

fn default_case_sensitive_like() -> bool {
    true
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            case_sensitive_like: true,
            busy_timeout: None,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MEMORY_PATH.to_string())
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn case_sensitive_like(mut self, case_sensitive_like: bool) -> Self {
        self.opts.case_sensitive_like = case_sensitive_like;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.opts.busy_timeout = Some(busy_timeout);
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open a connection with these options.
    ///
    /// # Errors
    ///
    /// Returns `SqlWrapperError::ConnectFailed` if the database cannot be opened or set up.
    pub fn open(self) -> Result<SqliteConnection, SqlWrapperError> {
        SqliteConnection::open(&self.finish())
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
