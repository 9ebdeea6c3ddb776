//! Time-of-day codec for `started_time` / `ended_time`
//!
//! Harvest writes these fields according to the account's time format
//! setting: `"08:00"` on 24-hour accounts and `"8:00am"` on 12-hour ones.
//! Outbound values are always sent as `HH:MM:SS`.
//!
//! # Usage
//! ```rust
//! use chrono::NaiveTime;
//! use harvest_domain::utils::time_of_day;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Example {
//!     #[serde(default, with = "time_of_day")]
//!     started_time: Option<NaiveTime>,
//! }
//! ```

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

use crate::constants::TIME_OF_DAY_FORMAT;

const ACCEPTED_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M%p", "%I:%M %p", "%I%p"];

/// Serde serialization result type
type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

/// Format a time of day the way the API expects it in request bodies.
pub fn format(value: &NaiveTime) -> String {
    value.format(TIME_OF_DAY_FORMAT).to_string()
}

/// Parse any of the time-of-day shapes Harvest emits.
pub fn parse(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    ACCEPTED_FORMATS.iter().find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}

pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> SerializeResult<S>
where
    S: Serializer,
{
    match value {
        Some(time) => serializer.serialize_str(&format(time)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse(&s).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognized time of day: {s:?}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Entry {
        #[serde(default, with = "crate::utils::time_of_day")]
        started_time: Option<NaiveTime>,
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parses_twenty_four_hour_values() {
        let entry: Entry = serde_json::from_str(r#"{"started_time":"13:45"}"#).unwrap();
        assert_eq!(entry.started_time, Some(hm(13, 45)));

        let entry: Entry = serde_json::from_str(r#"{"started_time":"07:05:30"}"#).unwrap();
        assert_eq!(entry.started_time, NaiveTime::from_hms_opt(7, 5, 30));
    }

    #[test]
    fn test_parses_twelve_hour_values() {
        let entry: Entry = serde_json::from_str(r#"{"started_time":"8:00am"}"#).unwrap();
        assert_eq!(entry.started_time, Some(hm(8, 0)));

        let entry: Entry = serde_json::from_str(r#"{"started_time":"1:30pm"}"#).unwrap();
        assert_eq!(entry.started_time, Some(hm(13, 30)));
    }

    #[test]
    fn test_null_and_missing_are_unset() {
        let entry: Entry = serde_json::from_str(r#"{"started_time":null}"#).unwrap();
        assert_eq!(entry.started_time, None);

        let entry: Entry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry.started_time, None);
    }

    #[test]
    fn test_rejects_garbage() {
        let result = serde_json::from_str::<Entry>(r#"{"started_time":"half past"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_hh_mm_ss() {
        let json = serde_json::to_string(&Entry { started_time: Some(hm(9, 5)) }).unwrap();
        assert_eq!(json, r#"{"started_time":"09:05:00"}"#);
    }
}
