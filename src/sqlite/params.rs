use rusqlite::types::Value;

use crate::types::{BindType, BindTypeSignature, ParamValue};

/// Convert a single bind parameter to a rusqlite `Value`.
#[must_use]
pub fn param_to_sqlite_value(value: &ParamValue) -> Value {
    match value {
        ParamValue::Int(i) => Value::Integer(*i),
        ParamValue::Float(f) => Value::Real(*f),
        ParamValue::Text(s) => Value::Text(s.clone()),
        ParamValue::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Convert a full parameter list, checking it against its bind signature.
///
/// # Errors
///
/// Returns a diagnostic when the signature does not describe `values` entry for entry.
pub fn convert_params(
    signature: &BindTypeSignature,
    values: &[ParamValue],
) -> Result<Vec<Value>, String> {
    if signature.len() != values.len() {
        return Err(format!(
            "bind type signature \"{signature}\" has {} entries for {} values",
            signature.len(),
            values.len()
        ));
    }
    let mut converted = Vec::with_capacity(values.len());
    for (idx, (ty, value)) in signature.types().iter().zip(values).enumerate() {
        if *ty != value.bind_type() {
            return Err(format!(
                "parameter {} is bound as '{}' but holds a '{}' value",
                idx + 1,
                ty.code(),
                value.bind_type().code()
            ));
        }
        converted.push(param_to_sqlite_value(value));
    }
    Ok(converted)
}

/// Storage class a bind type lands in on `SQLite`.
#[must_use]
pub fn sqlite_storage_class(ty: BindType) -> &'static str {
    match ty {
        BindType::Int => "INTEGER",
        BindType::Double => "REAL",
        BindType::String => "TEXT",
        BindType::Blob => "BLOB",
    }
}
