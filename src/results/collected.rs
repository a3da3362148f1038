use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde_json::{Map, Value as JsonValue};

use super::result_set::ResultSet;
use super::row::CustomDbRow;
use crate::types::RowValues;

/// Key of a collected row: the row's own `id`, or a sequential index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowKey {
    Int(i64),
    Text(String),
}

impl RowKey {
    /// Key derived from an `id` value. Canonical integer strings (`"12"`, `"-3"`) fold into
    /// integer keys; floats are truncated.
    fn from_id(value: &RowValues) -> RowKey {
        match value {
            RowValues::Int(i) => RowKey::Int(*i),
            #[allow(clippy::cast_possible_truncation)]
            RowValues::Float(f) => RowKey::Int(*f as i64),
            RowValues::Text(s) => match s.parse::<i64>() {
                Ok(i) if i.to_string() == *s => RowKey::Int(i),
                _ => RowKey::Text(s.clone()),
            },
            other => RowKey::Text(other.to_display_string()),
        }
    }
}

impl From<i64> for RowKey {
    fn from(value: i64) -> Self {
        RowKey::Int(value)
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        RowKey::Text(value.to_string())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(i) => write!(f, "{i}"),
            RowKey::Text(s) => f.write_str(s),
        }
    }
}

/// Rows folded into a map: keyed by their non-blank `id` column when they have one,
/// otherwise by the next free integer index. When a row has several `id` columns (a join),
/// the last one is used.
///
/// Keys are not guaranteed unique per source row: a later row replaces an earlier one with
/// the same key, and an `id` can collide with an index handed out to an id-less row.
#[derive(Debug, Clone, Default)]
pub struct CollectedRows {
    rows: BTreeMap<RowKey, CustomDbRow>,
    next_index: i64,
}

impl CollectedRows {
    #[must_use]
    pub fn from_result_set(result_set: ResultSet) -> Self {
        let mut collected = CollectedRows::default();
        for row in result_set {
            collected.push(row);
        }
        collected
    }

    /// Insert one row using the id-or-next-index rule.
    pub fn push(&mut self, row: CustomDbRow) {
        let key = match row.get("id") {
            Some(id) if !id.is_blank() => RowKey::from_id(id),
            _ => RowKey::Int(self.next_index),
        };
        if let RowKey::Int(i) = key {
            self.next_index = self.next_index.max(i.saturating_add(1));
        }
        self.rows.insert(key, row);
    }

    #[must_use]
    pub fn get(&self, key: &RowKey) -> Option<&CustomDbRow> {
        self.rows.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.rows.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, RowKey, CustomDbRow> {
        self.rows.iter()
    }

    /// JSON object keyed by the row keys' string forms.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::with_capacity(self.rows.len());
        for (key, row) in &self.rows {
            map.insert(key.to_string(), row.to_json());
        }
        JsonValue::Object(map)
    }
}

impl IntoIterator for CollectedRows {
    type Item = (RowKey, CustomDbRow);
    type IntoIter = btree_map::IntoIter<RowKey, CustomDbRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
