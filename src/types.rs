use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::SqlWrapperError;

/// A typed bind parameter.
///
/// Callers build the parameter list out of these variants; the bind type of each
/// placeholder follows from the variant, never from inspecting the value:
/// ```rust
/// use sql_query_wrapper::prelude::*;
///
/// let params = vec![
///     ParamValue::Int(1),
///     ParamValue::from("alice"),
///     ParamValue::Float(2.5),
/// ];
/// assert_eq!(BindTypeSignature::from_params(&params).to_string(), "isd");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Opaque binary data
    Blob(Vec<u8>),
}

impl ParamValue {
    #[must_use]
    pub fn bind_type(&self) -> BindType {
        match self {
            ParamValue::Int(_) => BindType::Int,
            ParamValue::Float(_) => BindType::Double,
            ParamValue::Text(_) => BindType::String,
            ParamValue::Blob(_) => BindType::Blob,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(value: Vec<u8>) -> Self {
        ParamValue::Blob(value)
    }
}

impl From<&[u8]> for ParamValue {
    fn from(value: &[u8]) -> Self {
        ParamValue::Blob(value.to_vec())
    }
}

/// Bind type tag for one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindType {
    Int,
    Double,
    String,
    Blob,
}

impl BindType {
    /// Single-character tag (`i`, `d`, `s`, `b`).
    #[must_use]
    pub fn code(self) -> char {
        match self {
            BindType::Int => 'i',
            BindType::Double => 'd',
            BindType::String => 's',
            BindType::Blob => 'b',
        }
    }
}

/// One [`BindType`] per parameter, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindTypeSignature(Vec<BindType>);

impl BindTypeSignature {
    #[must_use]
    pub fn from_params(params: &[ParamValue]) -> Self {
        Self(params.iter().map(ParamValue::bind_type).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn types(&self) -> &[BindType] {
        &self.0
    }
}

impl fmt::Display for BindTypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ty in &self.0 {
            write!(f, "{}", ty.code())?;
        }
        Ok(())
    }
}

/// What `execute` hands back for a successful statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnMode {
    /// The materialized row set (or the no-result sentinel for DML).
    #[default]
    Result,
    /// The connection's last auto-generated row id.
    Id,
}

impl ReturnMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnMode::Result => "result",
            ReturnMode::Id => "id",
        }
    }
}

impl fmt::Display for ReturnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnMode {
    type Err = SqlWrapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "result" => Ok(ReturnMode::Result),
            "id" => Ok(ReturnMode::Id),
            other => Err(SqlWrapperError::InvalidReturnMode(format!(
                "{other:?}; valid options are '{}' or '{}'",
                ReturnMode::Result,
                ReturnMode::Id
            ))),
        }
    }
}

/// Values read back from a database row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
    /// NULL value
    Null,
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for values a loosely typed caller would treat as "empty": NULL, `0`, `0.0`,
    /// `""`, `"0"`, and a zero-length blob.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            RowValues::Null => true,
            RowValues::Int(i) => *i == 0,
            RowValues::Float(f) => *f == 0.0,
            RowValues::Text(s) => s.is_empty() || s == "0",
            RowValues::Blob(b) => b.is_empty(),
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Render the value as plain text; NULL becomes the empty string.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            RowValues::Int(i) => i.to_string(),
            RowValues::Float(f) => f.to_string(),
            RowValues::Text(s) => s.clone(),
            RowValues::Blob(b) => String::from_utf8_lossy(b).into_owned(),
            RowValues::Null => String::new(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            RowValues::Int(i) => JsonValue::from(*i),
            RowValues::Float(f) => JsonValue::from(*f),
            RowValues::Text(s) => JsonValue::String(s.clone()),
            RowValues::Blob(b) => JsonValue::from(b.clone()),
            RowValues::Null => JsonValue::Null,
        }
    }
}

impl From<ParamValue> for RowValues {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Int(i) => RowValues::Int(i),
            ParamValue::Float(f) => RowValues::Float(f),
            ParamValue::Text(s) => RowValues::Text(s),
            ParamValue::Blob(b) => RowValues::Blob(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_follows_variants() {
        let params = [
            ParamValue::from(7_i64),
            ParamValue::from(1.5),
            ParamValue::from("x"),
            ParamValue::from(vec![0_u8, 1]),
        ];
        let sig = BindTypeSignature::from_params(&params);
        assert_eq!(sig.len(), params.len());
        assert_eq!(sig.to_string(), "idsb");
        assert!(BindTypeSignature::from_params(&[]).is_empty());
    }

    #[test]
    fn return_mode_parsing() {
        assert_eq!("result".parse::<ReturnMode>().unwrap(), ReturnMode::Result);
        assert_eq!("id".parse::<ReturnMode>().unwrap(), ReturnMode::Id);
        assert_eq!(ReturnMode::default(), ReturnMode::Result);

        let err = "bogus".parse::<ReturnMode>().unwrap_err();
        assert!(matches!(err, SqlWrapperError::InvalidReturnMode(_)));
        let msg = err.to_string();
        assert!(msg.contains("'result'") && msg.contains("'id'"), "{msg}");
    }

    #[test]
    fn return_mode_serde() {
        let mode: ReturnMode = serde_json::from_str("\"id\"").unwrap();
        assert_eq!(mode, ReturnMode::Id);
        assert_eq!(serde_json::to_string(&ReturnMode::Result).unwrap(), "\"result\"");
    }

    #[test]
    fn blank_matches_loose_empty() {
        assert!(RowValues::Null.is_blank());
        assert!(RowValues::Int(0).is_blank());
        assert!(RowValues::Float(0.0).is_blank());
        assert!(RowValues::Text(String::new()).is_blank());
        assert!(RowValues::Text("0".into()).is_blank());
        assert!(RowValues::Blob(vec![]).is_blank());

        assert!(!RowValues::Int(-1).is_blank());
        assert!(!RowValues::Text("00".into()).is_blank());
        assert!(!RowValues::Text(" ".into()).is_blank());
    }

    #[test]
    fn json_rendering() {
        assert_eq!(RowValues::Int(3).to_json(), serde_json::json!(3));
        assert_eq!(RowValues::Null.to_json(), serde_json::Value::Null);
        assert_eq!(
            serde_json::to_value(RowValues::Text("a".into())).unwrap(),
            serde_json::json!("a")
        );
    }
}
