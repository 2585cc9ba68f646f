//! Values that a platform may or may not be able to report.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire marker for a value the platform could not report.
pub const UNKNOWN: &str = "unknown";

/// A reading that is either known or explicitly unknown.
///
/// Serializes as the bare value, or as the literal string `"unknown"`, so a
/// record keeps its shape even when the environment does not support a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detected<T> {
    /// The platform reported a value.
    Known(T),
    /// The platform does not expose this value.
    #[default]
    Unknown,
}

impl<T> Detected<T> {
    /// Returns the known value, if any.
    pub fn known(self) -> Option<T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    /// Borrowing variant of [`Detected::known`].
    pub const fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl<T> From<Option<T>> for Detected<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl<T: Serialize> Serialize for Detected<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(value) => value.serialize(serializer),
            Self::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Detected<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_str() == Some(UNKNOWN) {
            return Ok(Self::Unknown);
        }
        T::deserialize(value).map(Self::Known).map_err(D::Error::custom)
    }
}
