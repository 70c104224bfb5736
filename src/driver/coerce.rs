//! `FromDriverValue` / `ToDriverValue` for the driver's native types

use super::{DriverValue, FromDriverValue, ToDriverValue};
use chrono::{DateTime, NaiveDateTime, Utc};

// SQLite's CURRENT_TIMESTAMP layout, optionally with fractional seconds
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

// 2^63, exactly representable as f64 unlike i64::MAX
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

// Largest magnitude an f64 holds without rounding the integer
const F64_EXACT_INTEGER: u64 = 1 << 53;

impl FromDriverValue for DriverValue {
    fn from_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        Ok(value)
    }
}

impl ToDriverValue for DriverValue {
    fn to_driver_value(&self) -> DriverValue {
        self.clone()
    }
}

impl FromDriverValue for i64 {
    fn from_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Integer(v) => Ok(v),
            other => Err(other),
        }
    }

    fn coerce_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Bool(v) => Ok(i64::from(v)),
            DriverValue::Real(v) if v.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&v) => {
                Ok(v as i64)
            }
            DriverValue::Text(text) => text.trim().parse().map_err(|_| DriverValue::Text(text)),
            other => Err(other),
        }
    }
}

impl ToDriverValue for i64 {
    fn to_driver_value(&self) -> DriverValue {
        DriverValue::Integer(*self)
    }
}

impl FromDriverValue for f64 {
    fn from_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Real(v) => Ok(v),
            other => Err(other),
        }
    }

    fn coerce_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Integer(v) if v.unsigned_abs() <= F64_EXACT_INTEGER => Ok(v as f64),
            DriverValue::Text(text) => text.trim().parse().map_err(|_| DriverValue::Text(text)),
            other => Err(other),
        }
    }
}

impl ToDriverValue for f64 {
    fn to_driver_value(&self) -> DriverValue {
        DriverValue::Real(*self)
    }
}

impl FromDriverValue for bool {
    fn from_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Bool(v) => Ok(v),
            other => Err(other),
        }
    }

    fn coerce_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Integer(0) => Ok(false),
            DriverValue::Integer(1) => Ok(true),
            DriverValue::Text(text) => {
                let parsed = match text.trim() {
                    "1" => Some(true),
                    "0" => Some(false),
                    t if t.eq_ignore_ascii_case("true") => Some(true),
                    t if t.eq_ignore_ascii_case("false") => Some(false),
                    _ => None,
                };
                parsed.ok_or(DriverValue::Text(text))
            }
            other => Err(other),
        }
    }
}

impl ToDriverValue for bool {
    fn to_driver_value(&self) -> DriverValue {
        DriverValue::Bool(*self)
    }
}

impl FromDriverValue for String {
    fn from_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Text(v) => Ok(v),
            other => Err(other),
        }
    }

    fn coerce_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Blob(bytes) => {
                String::from_utf8(bytes).map_err(|err| DriverValue::Blob(err.into_bytes()))
            }
            other => Err(other),
        }
    }
}

impl ToDriverValue for String {
    fn to_driver_value(&self) -> DriverValue {
        DriverValue::Text(self.clone())
    }
}

impl ToDriverValue for str {
    fn to_driver_value(&self) -> DriverValue {
        DriverValue::Text(self.to_owned())
    }
}

impl FromDriverValue for Vec<u8> {
    fn from_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Blob(v) => Ok(v),
            other => Err(other),
        }
    }

    fn coerce_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Text(text) => Ok(text.into_bytes()),
            other => Err(other),
        }
    }
}

impl ToDriverValue for Vec<u8> {
    fn to_driver_value(&self) -> DriverValue {
        DriverValue::Blob(self.clone())
    }
}

impl FromDriverValue for DateTime<Utc> {
    fn from_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Timestamp(v) => Ok(v),
            other => Err(other),
        }
    }

    fn coerce_driver_value(value: DriverValue) -> Result<Self, DriverValue> {
        match value {
            DriverValue::Text(text) => parse_timestamp(&text).ok_or(DriverValue::Text(text)),
            DriverValue::Integer(secs) => {
                DateTime::from_timestamp(secs, 0).ok_or(DriverValue::Integer(secs))
            }
            other => Err(other),
        }
    }
}

impl ToDriverValue for DateTime<Utc> {
    fn to_driver_value(&self) -> DriverValue {
        DriverValue::Timestamp(*self)
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, SQLITE_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
