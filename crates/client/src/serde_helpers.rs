//! Serde helpers for the upstream's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Provide deserializers that accept either JSON numbers or strings for
//!   numeric fields (the upstream mixes `8601` and `"8601"` freely).
//! - Keep coercion centralized so the model definitions stay readable.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (ranges, required/optional rules).
//! - Field-name mapping (handled with serde aliases on the models).

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
}

pub fn opt_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(StringOrNumber::String(s)) => s.parse::<u64>().map_err(D::Error::custom).map(Some),
        Some(StringOrNumber::U64(v)) => Ok(Some(v)),
        Some(StringOrNumber::I64(v)) => u64::try_from(v).map_err(D::Error::custom).map(Some),
        Some(StringOrNumber::F64(v)) => Ok(Some(v as u64)),
    }
}

pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    opt_u64_from_string_or_number(deserializer)?
        .ok_or_else(|| D::Error::custom("expected a number or numeric string"))
}

pub fn opt_f64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(StringOrNumber::String(s)) => s.parse::<f64>().map_err(D::Error::custom).map(Some),
        Some(StringOrNumber::U64(v)) => Ok(Some(v as f64)),
        Some(StringOrNumber::I64(v)) => Ok(Some(v as f64)),
        Some(StringOrNumber::F64(v)) => Ok(Some(v)),
    }
}

pub fn f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    opt_f64_from_string_or_number(deserializer)?
        .ok_or_else(|| D::Error::custom("expected a number or numeric string"))
}

pub fn opt_string_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        None => None,
        Some(StringOrNumber::String(s)) => Some(s),
        Some(StringOrNumber::U64(v)) => Some(v.to_string()),
        Some(StringOrNumber::I64(v)) => Some(v.to_string()),
        Some(StringOrNumber::F64(v)) => Some(v.to_string()),
    })
}

pub fn string_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    opt_string_from_number_or_string(deserializer)?
        .ok_or_else(|| D::Error::custom("expected a string or number"))
}
