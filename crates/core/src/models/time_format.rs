//! Wire formats for appointment dates and times.
//!
//! Dates travel as ISO `YYYY-MM-DD`, times as `HH:MM`. Parsing also accepts
//! `HH:MM:SS` as long as the seconds are zero, since bookings have minute
//! precision.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::errors::{ClinicError, ClinicResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub fn parse_date(value: &str) -> ClinicResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ClinicError::Validation(format!("Invalid date '{}', use YYYY-MM-DD", value))
    })
}

pub fn parse_time(value: &str) -> ClinicResult<NaiveTime> {
    let value = value.trim();
    let time = NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ClinicError::Validation(format!("Invalid time '{}', use HH:MM", value)))?;

    if time.second() != 0 || time.nanosecond() != 0 {
        return Err(ClinicError::Validation(format!(
            "Invalid time '{}', appointments have minute precision",
            value
        )));
    }

    Ok(time)
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Serde adapter for `NaiveTime` fields serialized as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_time(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Vec<NaiveTime>` serialized as a list of `HH:MM` strings.
pub mod hhmm_list {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, ser::SerializeSeq};

    pub fn serialize<S>(times: &[NaiveTime], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(times.len()))?;
        for time in times {
            seq.serialize_element(&super::format_time(*time))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| super::parse_time(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
