//! Serde helpers shared across wire types

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable amount field to zero.
///
/// The center backend emits `null` for unset money fields. Normalizing at
/// deserialization keeps all downstream arithmetic on plain `i64` VND values.
/// Combine with `#[serde(default)]` so missing fields also read as zero.
pub fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.unwrap_or(0))
}
