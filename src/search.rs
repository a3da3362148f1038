//! Relevance-ranked keyword search over one table.
//!
//! Every keyword is matched against every column with one `CASE` term; the terms are summed
//! into a `relevance` column. A case-insensitive hit scores 1 and a case-sensitive hit scores
//! 2, and rows are kept only when `relevance > 1`: two weak hits, or one strong hit. Column
//! values are compared with everything except ASCII letters and digits removed.
//!
//! The sum appears twice in the statement (projection and `WHERE`), so the keyword patterns
//! are bound twice, in the same order.
//!
//! Empty keywords (doubled delimiters, punctuation-only words) are kept. Their `%%` pattern
//! matches any non-NULL value, so each one adds a hit per column.

use serde::Deserialize;

use crate::error::SqlWrapperError;
use crate::identifier::{Identifier, IdentifierKind, validate_identifier};
use crate::types::ParamValue;

/// Options for [`build_search`]. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Splits the search text into keywords. An empty delimiter means `" "`.
    pub delimiter: String,
    /// Maximum rows; 0 is unbounded.
    pub limit: u64,
    /// Rows to skip; only applied together with a non-zero `limit`.
    pub offset: u64,
    pub case_sensitive: bool,
    /// Remove every character that is not an ASCII letter or digit from each keyword.
    pub strip_chars: bool,
    /// Keywords shorter than this many characters (after stripping) are ignored. 0 keeps
    /// every keyword, empty ones included.
    pub search_min_len: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            delimiter: " ".to_string(),
            limit: 0,
            offset: 0,
            case_sensitive: false,
            strip_chars: true,
            search_min_len: 0,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn with_strip_chars(mut self, strip_chars: bool) -> Self {
        self.strip_chars = strip_chars;
        self
    }

    #[must_use]
    pub fn with_search_min_len(mut self, search_min_len: usize) -> Self {
        self.search_min_len = search_min_len;
        self
    }
}

/// Statement text plus the parameters to bind to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub template: String,
    pub params: Vec<ParamValue>,
}

/// Split `search_text` into the keywords that will be matched. Empty keywords survive
/// unless `search_min_len` is above 0.
#[must_use]
pub fn search_keywords(search_text: &str, options: &SearchOptions) -> Vec<String> {
    let delimiter = if options.delimiter.is_empty() {
        " "
    } else {
        options.delimiter.as_str()
    };
    search_text
        .split(delimiter)
        .map(|keyword| {
            if options.strip_chars {
                keyword
                    .chars()
                    .filter(char::is_ascii_alphanumeric)
                    .collect::<String>()
            } else {
                keyword.to_string()
            }
        })
        .filter(|keyword: &String| keyword.chars().count() >= options.search_min_len)
        .collect()
}

/// Build the relevance search statement for `table`.
///
/// # Errors
///
/// Returns `SqlWrapperError::InvalidIdentifier` for the first invalid table or column name.
pub fn build_search<S: AsRef<str>>(
    table: &str,
    search_text: &str,
    columns: &[S],
    options: &SearchOptions,
) -> Result<SearchQuery, SqlWrapperError> {
    let table = validate_identifier(table, IdentifierKind::Table)?;
    let columns = columns
        .iter()
        .map(|c| validate_identifier(c.as_ref(), IdentifierKind::Column))
        .collect::<Result<Vec<Identifier>, _>>()?;

    let mut terms = Vec::new();
    let mut patterns = Vec::new();
    for keyword in search_keywords(search_text, options) {
        for column in &columns {
            let col = column.quoted();
            if options.case_sensitive {
                terms.push(format!(
                    "(CASE WHEN REGEXP_REPLACE({col}, '[^a-zA-Z0-9]', '') LIKE ? THEN 2 ELSE 0 END)"
                ));
                patterns.push(ParamValue::Text(format!("%{keyword}%")));
            } else {
                terms.push(format!(
                    "(CASE WHEN LOWER(REGEXP_REPLACE({col}, '[^a-zA-Z0-9]', '')) LIKE LOWER(?) THEN 1 ELSE 0 END)"
                ));
                patterns.push(ParamValue::Text(format!("%{}%", keyword.to_lowercase())));
            }
        }
    }

    // no columns, or every keyword filtered out by `search_min_len`
    let relevance = if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ")
    };

    let mut template = format!(
        "SELECT *, ({relevance}) AS relevance FROM {} WHERE ({relevance}) > 1 ORDER BY relevance DESC",
        table.quoted()
    );
    if options.limit > 0 {
        template.push_str(&format!(" LIMIT {}", options.limit));
        if options.offset > 0 {
            template.push_str(&format!(" OFFSET {}", options.offset));
        }
    }

    let mut params = Vec::with_capacity(patterns.len() * 2);
    params.extend(patterns.iter().cloned());
    params.extend(patterns);

    Ok(SearchQuery { template, params })
}
