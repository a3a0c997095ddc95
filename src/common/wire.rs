//! Serde glue for service enums borrowed from `aws_sdk_dynamodb::types`.
//!
//! Those enums carry no serde support of their own; on the wire they are
//! plain strings, so they are written through their `as_str()` form.

use serde::{Deserialize, Deserializer, Serializer};

/// Serializes any service enum as its wire string.
pub(crate) fn as_str<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<str>,
    S: Serializer,
{
    serializer.serialize_str(value.as_ref())
}

/// Serializes an optional service enum; pair with `skip_serializing_if`.
pub(crate) fn option_as_str<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<str>,
    S: Serializer,
{
    match value {
        Some(value) => serializer.serialize_str(value.as_ref()),
        None => serializer.serialize_none(),
    }
}

/// Deserializes a service enum from its wire string. Unknown strings map to
/// the enum's `Unknown` variant.
pub(crate) fn from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: for<'a> From<&'a str>,
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(T::from(value.as_str()))
}
