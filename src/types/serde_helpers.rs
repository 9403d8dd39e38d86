//! Custom serde helpers for the seller platform's wire formats.
//!
//! The platform sends `null` where other APIs omit a field, and some request
//! fields hold secrets that must be written out verbatim. These modules
//! provide reusable serde helpers for both cases plus integer durations for
//! configuration files.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serializer};

/// Deserialize `null` as the type's default value.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use temu_seller_client::types::serde_helpers::null_as_default;
///
/// #[derive(Deserialize, Debug)]
/// struct Envelope {
///     #[serde(rename = "errorMsg", default, deserialize_with = "null_as_default::deserialize")]
///     error_msg: String,
/// }
///
/// let json = r#"{"errorMsg":null}"#;
/// let envelope: Envelope = serde_json::from_str(json).unwrap();
/// assert_eq!(envelope.error_msg, "");
/// ```
pub mod null_as_default {
    use super::*;

    /// Deserialize a value, mapping `null` to `T::default()`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de> + Default,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Deserialize an empty string as `None`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use temu_seller_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     mask_mobile: Option<String>,
/// }
///
/// let json = r#"{"mask_mobile":""}"#;
/// let response: Response = serde_json::from_str(json).unwrap();
/// assert!(response.mask_mobile.is_none());
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

/// Serialize a [`SecretString`] as its plain value.
///
/// Request parameters keep secrets wrapped so they stay out of `Debug`
/// output; the wire format still needs the raw string.
pub mod expose_secret {
    use super::*;

    /// Write the exposed secret as a JSON string.
    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(secret.expose_secret())
    }
}

/// A [`Duration`] written as whole seconds.
pub mod duration_secs {
    use super::*;

    /// Serialize as seconds.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    /// Deserialize from seconds.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// A [`Duration`] written as whole milliseconds.
pub mod duration_millis {
    use super::*;

    /// Serialize as milliseconds.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    /// Deserialize from milliseconds.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
