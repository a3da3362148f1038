#![allow(dead_code)]

use sql_query_wrapper::prelude::*;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Executor over a fresh in-memory database.
pub fn memory_executor() -> Result<QueryExecutor<SqliteConnection>, SqlWrapperError> {
    init_tracing();
    Ok(QueryExecutor::with_connection(
        SqliteConnection::open_in_memory()?,
    ))
}

/// Run DDL/seed SQL directly on the underlying connection.
pub fn seed(
    db: &QueryExecutor<SqliteConnection>,
    sql: &str,
) -> Result<(), SqlWrapperError> {
    let conn = db
        .connection()
        .ok_or(SqlWrapperError::ConnectionNotConfigured)?;
    conn.raw().execute_batch(sql)?;
    Ok(())
}
