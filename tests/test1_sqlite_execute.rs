#![cfg(feature = "sqlite")]

mod common;

use std::time::Duration;

use common::{memory_executor, seed};
use sql_query_wrapper::prelude::*;
use tempfile::tempdir;

#[test]
fn select_returns_rows_in_backend_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_executor()?;
    seed(
        &db,
        "CREATE TABLE t (id INTEGER, name TEXT);
         INSERT INTO t VALUES (3, 'c'), (1, 'a'), (2, 'b');",
    )?;

    let rs = db.query("SELECT id, name FROM t ORDER BY name DESC", &[])?;
    let names: Vec<_> = rs
        .iter()
        .map(|row| row.get("name").unwrap().as_text().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["c", "b", "a"]);
    assert_eq!(rs.len(), 3);
    assert_eq!(
        rs.get_column_names().unwrap().as_slice(),
        ["id".to_string(), "name".to_string()]
    );
    Ok(())
}

#[test]
fn select_with_typed_params() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_executor()?;
    let rs = db.query(
        "SELECT ? AS i, ? AS f, ? AS s, ? AS b",
        &[
            ParamValue::Int(1),
            ParamValue::Float(2.5),
            ParamValue::from("three"),
            ParamValue::from(vec![4_u8, 5]),
        ],
    )?;
    let row = &rs.results[0];
    assert_eq!(row.get("i"), Some(&RowValues::Int(1)));
    assert_eq!(row.get("f").and_then(RowValues::as_float), Some(2.5));
    assert_eq!(row.get("s").and_then(RowValues::as_text), Some("three"));
    assert_eq!(row.get("b").and_then(RowValues::as_blob), Some(&[4_u8, 5][..]));
    Ok(())
}

#[test]
fn insert_in_id_mode_returns_last_insert_id() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_executor()?;
    seed(
        &db,
        "CREATE TABLE test_table (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);
         INSERT INTO test_table (name) VALUES ('test');",
    )?;

    let out = db.execute(
        "INSERT INTO test_table (name) VALUES (?)",
        &[ParamValue::from("test2")],
        ReturnMode::Id,
    )?;
    assert_eq!(out.insert_id(), Some(2));

    let id = db.insert(
        "INSERT INTO test_table (name) VALUES (?)",
        &[ParamValue::from("test3")],
    )?;
    assert!(id > 0);
    let conn = db.connection().unwrap();
    assert_eq!(id, conn.raw().last_insert_rowid());
    Ok(())
}

#[test]
fn dml_in_result_mode_is_no_result() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_executor()?;
    seed(
        &db,
        "CREATE TABLE t (id INTEGER, name TEXT);
         INSERT INTO t VALUES (1, 'a'), (2, 'b'), (3, 'c');",
    )?;

    let out = db.execute(
        "UPDATE t SET name = ? WHERE id > ?",
        &[ParamValue::from("z"), ParamValue::Int(1)],
        ReturnMode::Result,
    )?;
    assert!(matches!(out, QueryOutcome::NoResult { rows_affected: 2 }));

    let out = db.execute("CREATE TABLE other (x INTEGER)", &[], ReturnMode::Result)?;
    assert!(out.is_no_result());

    let err = db.query("DELETE FROM t", &[]).unwrap_err();
    assert!(matches!(err, SqlWrapperError::InvalidResultSet(_)));
    Ok(())
}

#[test]
fn parameter_values_never_alter_statement() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_executor()?;
    seed(
        &db,
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);
         INSERT INTO users (name) VALUES ('alice'), ('bob');",
    )?;

    let hostile = "x' OR '1'='1";
    let rs = db.query(
        "SELECT * FROM users WHERE name = ?",
        &[ParamValue::from(hostile)],
    )?;
    assert!(rs.is_empty());

    db.execute(
        "INSERT INTO users (name) VALUES (?)",
        &[ParamValue::from("'); DROP TABLE users; --")],
        ReturnMode::Result,
    )?;
    assert_eq!(db.count_rows("users", None, None)?, 3);
    Ok(())
}

#[test]
fn malformed_template_is_prepare_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_executor()?;
    let err = db
        .execute("SELEC 1 FROMM nowhere", &[], ReturnMode::Result)
        .unwrap_err();
    match err {
        SqlWrapperError::PrepareError(msg) => {
            assert!(!msg.is_empty());
            assert_eq!(db.last_error(), msg);
        }
        other => panic!("expected PrepareError, got {other}"),
    }

    let err = db.query("SELECT missing FROM nowhere", &[]).unwrap_err();
    assert!(matches!(err, SqlWrapperError::PrepareError(_)));
    Ok(())
}

#[test]
fn constraint_violation_is_execution_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_executor()?;
    seed(&db, "CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);")?;
    db.execute(
        "INSERT INTO t (name) VALUES (?)",
        &[ParamValue::from("a")],
        ReturnMode::Id,
    )?;
    assert_eq!(db.last_error(), "");

    let err = db
        .execute(
            "INSERT INTO t (name) VALUES (?)",
            &[ParamValue::from("a")],
            ReturnMode::Id,
        )
        .unwrap_err();
    match err {
        SqlWrapperError::ExecutionError(msg) => {
            assert!(msg.contains("UNIQUE"), "{msg}");
            assert_eq!(db.last_error(), msg);
        }
        other => panic!("expected ExecutionError, got {other}"),
    }

    // next successful call clears the diagnostic
    db.query("SELECT 1", &[])?;
    assert_eq!(db.last_error(), "");
    Ok(())
}

#[test]
fn placeholder_count_mismatch_is_execution_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_executor()?;
    let err = db
        .query("SELECT ? AS a, ? AS b", &[ParamValue::Int(1)])
        .unwrap_err();
    assert!(matches!(err, SqlWrapperError::ExecutionError(_)));

    let err = db.query("SELECT ? AS a", &[]).unwrap_err();
    assert!(matches!(err, SqlWrapperError::ExecutionError(_)));

    let err = db
        .query("SELECT 1", &[ParamValue::Int(1), ParamValue::Int(2)])
        .unwrap_err();
    assert!(matches!(err, SqlWrapperError::ExecutionError(_)));
    Ok(())
}

#[test]
fn named_modes() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_executor()?;
    seed(&db, "CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT);")?;

    let out = db.execute_named("INSERT INTO t (v) VALUES ('x')", &[], "id")?;
    assert_eq!(out.insert_id(), Some(1));
    let out = db.execute_named("SELECT v FROM t", &[], "result")?;
    assert_eq!(out.as_result_set().map(ResultSet::len), Some(1));

    // a failing statement leaves a diagnostic; a bad mode must not touch it
    assert!(db.query("SELECT nope FROM t", &[]).is_err());
    let before = db.last_error();
    assert!(!before.is_empty());
    let err = db.execute_named("SELECT 1", &[], "bogus").unwrap_err();
    assert!(matches!(err, SqlWrapperError::InvalidReturnMode(_)));
    assert!(err.to_string().contains("Invalid return type"));
    assert_eq!(db.last_error(), before);
    Ok(())
}

#[test]
fn no_connection_is_reported() {
    let mut db: QueryExecutor<SqliteConnection> = QueryExecutor::new();
    let err = db.execute("SELECT 1", &[], ReturnMode::Result).unwrap_err();
    assert!(matches!(err, SqlWrapperError::ConnectionNotConfigured));
    assert!(err.to_string().contains("Database connection not set"));
    assert_eq!(db.last_error(), "");
    assert!(matches!(
        db.count_rows("users", None, None),
        Err(SqlWrapperError::ConnectionNotConfigured)
    ));
}

#[test]
fn file_database_survives_reconnect() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("wrapper.db").to_string_lossy().into_owned();

    let conn = SqliteOptionsBuilder::new(path.clone())
        .busy_timeout(Duration::from_millis(500))
        .open()?;
    let mut db = QueryExecutor::with_connection(conn);
    db.execute(
        "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT)",
        &[],
        ReturnMode::Result,
    )?;
    db.insert("INSERT INTO notes (body) VALUES (?)", &[ParamValue::from("hello")])?;
    let conn = db.take_connection().expect("connection");
    drop(conn);

    db.set_connection(SqliteConnection::open(&SqliteOptions::new(path))?);
    assert_eq!(db.count_rows("notes", None, None)?, 1);
    Ok(())
}

#[test]
fn open_failure_is_connect_failed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir
        .path()
        .join("missing")
        .join("nested")
        .join("x.db")
        .to_string_lossy()
        .into_owned();
    let err = SqliteOptionsBuilder::new(path).open().unwrap_err();
    assert!(matches!(err, SqlWrapperError::ConnectFailed(_)));
    Ok(())
}
