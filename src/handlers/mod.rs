pub mod hotels;
pub mod reservations;

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

/// Reads an optional query value, treating `key=` (or whitespace only) the same
/// as an absent key. Non-blank values are parsed as submitted.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value {
        Some(raw) if !raw.trim().is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}
