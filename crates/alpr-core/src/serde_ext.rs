use serde::{Deserialize, Deserializer};

/// Deserializes an explicit `null` the same way as a missing field.
///
/// API Gateway sends `"queryStringParameters": null` rather than omitting
/// the key, which plain `#[serde(default)]` rejects.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
