use std::{cmp::Ordering, fmt};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// A leaf value of a flattened record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Scalar {
    #[default]
    Null,
    Boolean(bool),
    Number(Number),
    String(String),
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    /// Converts a JSON leaf. Objects and arrays are not scalars and yield `None`.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(value) => Some(Scalar::Boolean(value)),
            Value::Number(value) => Some(Scalar::Number(value)),
            Value::String(value) => Some(Scalar::String(value)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(value) => value.as_f64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::Number(value) => value.as_u64(),
            _ => None,
        }
    }

    /// Reads the value as a point in time, parsing RFC 3339 strings on the fly.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Scalar::Timestamp(value) => Some(*value),
            Scalar::String(value) => parse_timestamp(value),
            _ => None,
        }
    }

    /// Turns an RFC 3339 string into a [`Scalar::Timestamp`]. Anything else is returned as is.
    pub fn into_timestamp(self) -> Self {
        match self {
            Scalar::String(value) => match parse_timestamp(&value) {
                Some(timestamp) => Scalar::Timestamp(timestamp),
                None => Scalar::String(value),
            },
            other => other,
        }
    }

    /// A total order used for sorting rows: values of the same kind compare naturally, kinds
    /// are ranked booleans, numbers, timestamps, strings, and nulls sort last.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a.cmp(b),
            (Scalar::Number(a), Scalar::Number(b)) => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
            (Scalar::Timestamp(a), Scalar::Timestamp(b)) => a.cmp(b),
            (Scalar::String(a), Scalar::String(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Scalar::Boolean(_) => 0,
            Scalar::Number(_) => 1,
            Scalar::Timestamp(_) => 2,
            Scalar::String(_) => 3,
            Scalar::Null => 4,
        }
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Boolean(value) => write!(f, "{value}"),
            Scalar::Number(value) => write!(f, "{value}"),
            Scalar::String(value) => f.write_str(value),
            Scalar::Timestamp(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Boolean(value) => serializer.serialize_bool(*value),
            Scalar::Number(value) => value.serialize(serializer),
            Scalar::String(value) => serializer.serialize_str(value),
            Scalar::Timestamp(value) => value.serialize(serializer),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::Timestamp(value)
    }
}
