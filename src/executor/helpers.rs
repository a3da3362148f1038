use tracing::debug;

use crate::backend::Connection;
use crate::error::SqlWrapperError;
use crate::identifier::{IdentifierKind, validate_identifier};
use crate::results::{QueryOutcome, ResultSet};
use crate::search::{SearchOptions, build_search};
use crate::types::{ParamValue, ReturnMode, RowValues};

use super::QueryExecutor;

impl<C: Connection> QueryExecutor<C> {
    /// Relevance search over `columns` of `table`; see [`crate::search`] for the scoring.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` for a bad table/column name (before any statement is
    /// prepared), `InvalidResultSet` if the statement produced no row set, and the errors of
    /// [`execute`](Self::execute).
    pub fn search<S: AsRef<str>>(
        &mut self,
        table: &str,
        search_text: &str,
        columns: &[S],
        options: &SearchOptions,
    ) -> Result<ResultSet, SqlWrapperError> {
        let query = build_search(table, search_text, columns, options)?;
        debug!(table, terms = query.params.len() / 2, "running search");
        match self.execute(&query.template, &query.params, ReturnMode::Result)? {
            QueryOutcome::Rows(set) => Ok(set),
            _ => Err(SqlWrapperError::InvalidResultSet("search query".to_string())),
        }
    }

    /// Number of rows in `table`, optionally restricted to rows where `column = value`.
    ///
    /// The filter only applies when both `column` and `value` are given and non-empty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` for a bad table/column name (before any statement is
    /// prepared), `InvalidResultSet` if no row set came back, and the errors of
    /// [`execute`](Self::execute).
    pub fn count_rows(
        &mut self,
        table: &str,
        column: Option<&str>,
        value: Option<&str>,
    ) -> Result<i64, SqlWrapperError> {
        let table = validate_identifier(table, IdentifierKind::Table)?;
        let mut sql = format!("SELECT COUNT(*) FROM {}", table.quoted());
        let mut params = Vec::new();
        if let (Some(column), Some(value)) = (column, value)
            && !column.is_empty()
            && !value.is_empty()
        {
            let column = validate_identifier(column, IdentifierKind::Column)?;
            sql.push_str(&format!(" WHERE {} = ?", column.quoted()));
            params.push(ParamValue::from(value));
        }

        let set = match self.execute(&sql, &params, ReturnMode::Result)? {
            QueryOutcome::Rows(set) => set,
            _ => return Err(SqlWrapperError::InvalidResultSet("count_rows query".to_string())),
        };
        let count = set
            .results
            .first()
            .and_then(|row| row.get_by_index(0))
            .map_or(0, |value| match value {
                RowValues::Int(i) => *i,
                #[allow(clippy::cast_possible_truncation)]
                RowValues::Float(f) => *f as i64,
                other => other.to_display_string().trim().parse().unwrap_or(0),
            });
        Ok(count)
    }

    /// Distinct non-blank values of `column`, ascending.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` for a bad table/column name (before any statement is
    /// prepared), `InvalidResultSet` if no row set came back, and the errors of
    /// [`execute`](Self::execute).
    pub fn unique_rows(&mut self, table: &str, column: &str) -> Result<Vec<String>, SqlWrapperError> {
        let table = validate_identifier(table, IdentifierKind::Table)?;
        let column = validate_identifier(column, IdentifierKind::Column)?;
        let sql = format!(
            "SELECT DISTINCT {col} FROM {table} ORDER BY {col} ASC",
            col = column.quoted(),
            table = table.quoted()
        );

        let set = match self.execute(&sql, &[], ReturnMode::Result)? {
            QueryOutcome::Rows(set) => set,
            _ => {
                return Err(SqlWrapperError::InvalidResultSet(
                    "unique_rows query".to_string(),
                ));
            }
        };
        Ok(set
            .iter()
            .filter_map(|row| row.get_by_index(0))
            .filter(|value| !value.is_blank())
            .map(RowValues::to_display_string)
            .collect())
    }
}
