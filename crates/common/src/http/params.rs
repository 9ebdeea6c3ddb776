//! Typed parameter values
//!
//! Every query parameter and body field goes through [`Param`], which owns
//! the wire formatting: booleans are `true`/`false`, decimals use `.`,
//! timestamps are `YYYY-MM-DDTHH:MM:SSZ`, dates `YYYY-MM-DD` and times of day
//! `HH:MM:SS`. None of it depends on the process locale.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use harvest_domain::constants::{DATE_FORMAT, DATE_TIME_FORMAT, TIME_OF_DAY_FORMAT};
use serde_json::{Number, Value};

/// A single scalar parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    /// A timestamp truncated to its date
    Date(NaiveDate),
    TimeOfDay(NaiveTime),
}

impl Param {
    /// Timestamp parameter; `truncate_time` sends only the date part.
    #[must_use]
    pub fn timestamp(value: DateTime<Utc>, truncate_time: bool) -> Self {
        if truncate_time {
            Self::Date(value.date_naive())
        } else {
            Self::Timestamp(value)
        }
    }

    /// Form and query representation.
    #[must_use]
    pub fn to_wire_string(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Timestamp(value) => value.format(DATE_TIME_FORMAT).to_string(),
            Self::Date(value) => value.format(DATE_FORMAT).to_string(),
            Self::TimeOfDay(value) => value.format(TIME_OF_DAY_FORMAT).to_string(),
        }
    }

    /// JSON representation. `None` for non-finite decimals, which JSON
    /// cannot carry.
    #[must_use]
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Integer(value) => Some(Value::from(*value)),
            Self::Decimal(value) => Number::from_f64(*value).map(Value::Number),
            Self::Bool(value) => Some(Value::Bool(*value)),
            Self::Text(_) | Self::Timestamp(_) | Self::Date(_) | Self::TimeOfDay(_) => {
                Some(Value::String(self.to_wire_string()))
            }
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Param {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for Param {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<NaiveDate> for Param {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for Param {
    fn from(value: NaiveTime) -> Self {
        Self::TimeOfDay(value)
    }
}

/// Conversion into an optional [`Param`]; `None` means "omit this
/// parameter".
///
/// Implemented for every type [`Param`] converts from and for its `Option`.
pub trait IntoParam {
    fn into_param(self) -> Option<Param>;
}

impl IntoParam for Param {
    fn into_param(self) -> Option<Param> {
        Some(self)
    }
}

impl IntoParam for Option<Param> {
    fn into_param(self) -> Option<Param> {
        self
    }
}

macro_rules! impl_into_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoParam for $ty {
                fn into_param(self) -> Option<Param> {
                    Some(Param::from(self))
                }
            }

            impl IntoParam for Option<$ty> {
                fn into_param(self) -> Option<Param> {
                    self.map(Param::from)
                }
            }
        )*
    };
}

impl_into_param!(
    String,
    i32,
    u32,
    i64,
    f64,
    bool,
    DateTime<Utc>,
    NaiveDate,
    NaiveTime,
);

impl IntoParam for &str {
    fn into_param(self) -> Option<Param> {
        Some(Param::from(self))
    }
}

impl IntoParam for Option<&str> {
    fn into_param(self) -> Option<Param> {
        self.map(Param::from)
    }
}

impl IntoParam for &String {
    fn into_param(self) -> Option<Param> {
        Some(Param::from(self))
    }
}

impl IntoParam for Option<&String> {
    fn into_param(self) -> Option<Param> {
        self.map(Param::from)
    }
}
