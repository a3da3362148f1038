//! Lexical validation for table and column names.
//!
//! Placeholders can only carry values, so any name spliced into statement text has to pass
//! through [`validate_identifier`] first. Only `^[A-Za-z_][A-Za-z0-9_]*$` is accepted.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SqlWrapperError;

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap_or_else(|e| panic!("identifier regex: {e}"))
});

/// Label used in error messages to say what the rejected name was meant to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Table,
    Column,
    Identifier,
}

impl IdentifierKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierKind::Table => "table",
            IdentifierKind::Column => "column",
            IdentifierKind::Identifier => "identifier",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table or column name that passed [`validate_identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Backtick-quoted form for use inside statement text.
    #[must_use]
    pub fn quoted(&self) -> String {
        format!("`{}`", self.0)
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a table/column name before it is interpolated into SQL.
///
/// # Errors
///
/// Returns `SqlWrapperError::InvalidIdentifier` naming `kind` and the rejected value when
/// `name` is empty or contains anything outside `[A-Za-z0-9_]` (or starts with a digit).
pub fn validate_identifier(name: &str, kind: IdentifierKind) -> Result<Identifier, SqlWrapperError> {
    if name.is_empty() || !IDENTIFIER_RE.is_match(name) {
        return Err(SqlWrapperError::InvalidIdentifier {
            kind,
            value: name.to_string(),
        });
    }
    Ok(Identifier(name.to_string()))
}
