//! Materialized query results.

mod collected;
mod result_set;
mod row;

pub use collected::{CollectedRows, RowKey};
pub use result_set::ResultSet;
pub use row::CustomDbRow;

/// Normalized outcome of one executed statement.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// Rows produced by a row-returning statement, in backend order.
    Rows(ResultSet),
    /// The statement produced no row set (INSERT/UPDATE/DELETE/DDL).
    NoResult { rows_affected: usize },
    /// Last auto-generated row id, returned for [`ReturnMode::Id`](crate::ReturnMode::Id).
    InsertId(i64),
}

impl QueryOutcome {
    /// Borrow the row set, if there is one.
    #[must_use]
    pub fn as_result_set(&self) -> Option<&ResultSet> {
        match self {
            QueryOutcome::Rows(set) => Some(set),
            _ => None,
        }
    }

    /// Take the row set, if there is one.
    #[must_use]
    pub fn into_result_set(self) -> Option<ResultSet> {
        match self {
            QueryOutcome::Rows(set) => Some(set),
            _ => None,
        }
    }

    #[must_use]
    pub fn insert_id(&self) -> Option<i64> {
        match self {
            QueryOutcome::InsertId(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_no_result(&self) -> bool {
        matches!(self, QueryOutcome::NoResult { .. })
    }
}
