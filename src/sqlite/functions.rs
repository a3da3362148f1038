use std::sync::Arc;

use regex::Regex;
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Register the scalar functions the search statement relies on.
///
/// `REGEXP_REPLACE(text, pattern, replacement)` replaces every match of `pattern`; a NULL
/// `text` yields NULL. The compiled pattern is cached per statement.
///
/// # Errors
///
/// Returns `rusqlite::Error` if `SQLite` refuses the registration.
pub fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "regexp_replace",
        3,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        regexp_replace,
    )
}

fn regexp_replace(ctx: &Context<'_>) -> rusqlite::Result<Option<String>> {
    let pattern: Arc<Regex> = ctx.get_or_create_aux(1, |vr| -> Result<Regex, BoxError> {
        Ok(Regex::new(vr.as_str()?)?)
    })?;
    let replacement: String = ctx.get(2)?;

    let text = match ctx.get_raw(0) {
        ValueRef::Null => return Ok(None),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    };

    Ok(Some(
        pattern.replace_all(&text, replacement.as_str()).into_owned(),
    ))
}
