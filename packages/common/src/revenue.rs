//! Serde helpers for sales revenue.
//!
//! Revenue can exceed the integer range JSON consumers handle safely, so it is
//! always written as a decimal string. Requests may send either a decimal
//! string or a JSON integer; both must fit a non-negative `i64`.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Error when a revenue value cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RevenueError {
    #[error("Revenue must not be negative")]
    Negative,
    #[error("Revenue '{0}' is not a whole number within 0..=9223372036854775807")]
    Invalid(String),
}

/// Parse a decimal revenue string exactly.
pub fn parse(s: &str) -> Result<i64, RevenueError> {
    let trimmed = s.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| RevenueError::Invalid(trimmed.to_string()))?;
    if value < 0 {
        return Err(RevenueError::Negative);
    }
    Ok(value)
}

pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    deserializer.deserialize_any(RevenueVisitor)
}

/// Same as [`deserialize`] for optional fields (`#[serde(default, with = "revenue::option")]`).
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        deserializer.deserialize_option(OptionVisitor)
    }

    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("null or a non-negative revenue")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            super::deserialize(d).map(Some)
        }
    }
}

struct RevenueVisitor;

impl<'de> Visitor<'de> for RevenueVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer or decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        if v < 0 {
            return Err(E::custom(RevenueError::Negative));
        }
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::custom(RevenueError::Invalid(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        Err(E::custom(RevenueError::Invalid(v.to_string())))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        parse(v).map_err(E::custom)
    }
}
