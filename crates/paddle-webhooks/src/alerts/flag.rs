//! Integer flag fields such as `marketing_consent` and `initial_payment`.
//!
//! Paddle documents these fields as integers, but deliveries have been seen
//! carrying them as booleans as well. Both forms decode; the form received is
//! preserved so re-encoding a record does not change it.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const EXPECTED: &str = "an integer or boolean flag";

/// A flag value as it appeared in the delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Flag {
    /// Integer form, normally `0` or `1`.
    Integer(i64),
    /// Boolean form.
    Boolean(bool),
}

impl Flag {
    /// Whether the flag is set. Any non-zero integer counts as set.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Integer(value) => *value != 0,
            Self::Boolean(value) => *value,
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Flag {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Boolean(value) => write!(f, "{}", value),
        }
    }
}

/// Error returned when a string is not a flag value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not an integer or boolean flag")]
pub struct ParseFlagError {
    value: String,
}

impl FromStr for Flag {
    type Err = ParseFlagError;

    /// Parse the form-field text of a flag: `true`, `false` or a decimal
    /// integer. Surrounding whitespace is not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::Boolean(true)),
            "false" => Ok(Self::Boolean(false)),
            _ => s.parse::<i64>().map(Self::Integer).map_err(|_| ParseFlagError {
                value: s.to_string(),
            }),
        }
    }
}

// Form fields are always strings, so the empty string stands for "not sent".
struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = Option<Flag>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(EXPECTED)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(Flag::Boolean(value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(Flag::Integer(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(|value| Some(Flag::Integer(value)))
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<Flag>()
            .map(Some)
            .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_any(FlagVisitor)?
            .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(""), &EXPECTED))
    }
}

/// Deserialize an optional flag field. Empty strings and nulls become `None`.
pub(crate) fn optional<'de, D>(deserializer: D) -> Result<Option<Flag>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagVisitor)
}

#[cfg(test)]
#[path = "flag_tests.rs"]
mod tests;
