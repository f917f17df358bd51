//! Deserialization helpers that accept the loose JSON the backend produces.
//!
//! Optional text fields arrive as `null` or are missing entirely; both map to
//! an empty string so the editing code never has to juggle `Option<String>`.

use serde::{Deserialize, Deserializer};

/// Deserializes a nullable string, mapping `null` to `""`.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a nullable boolean, mapping `null` to `true`.
pub fn bool_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// Deserializes a nullable list, mapping `null` to an empty vector.
pub fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn default_true() -> bool {
    true
}
