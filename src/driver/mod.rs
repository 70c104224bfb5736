//! Storage-driver conversions for `Optional`
//!
//! A storage driver hands out and accepts values from a small closed domain,
//! modelled here as [`DriverValue`]. [`DriverValue::Null`] is the absence
//! sentinel. Reading from storage goes through [`Optional::scan`], writing
//! through [`Optional::value`].

mod coerce;
pub mod sql;

use crate::config::{CoercionMode, ScanConfig};
use crate::error::{OptError, Result};
use crate::optional::Optional;
use chrono::{DateTime, Utc};
use std::fmt;

/// A value as exchanged with a storage driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl DriverValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DriverValue::Null)
    }

    /// Name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            DriverValue::Null => "null",
            DriverValue::Integer(_) => "integer",
            DriverValue::Real(_) => "real",
            DriverValue::Text(_) => "text",
            DriverValue::Blob(_) => "blob",
            DriverValue::Bool(_) => "bool",
            DriverValue::Timestamp(_) => "timestamp",
        }
    }
}

impl fmt::Display for DriverValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverValue::Null => write!(f, "NULL"),
            DriverValue::Integer(v) => write!(f, "{v}"),
            DriverValue::Real(v) => write!(f, "{v}"),
            DriverValue::Text(v) => write!(f, "{v}"),
            DriverValue::Blob(bytes) => {
                write!(f, "0x")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            DriverValue::Bool(v) => write!(f, "{v}"),
            DriverValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

/// Narrow a [`DriverValue`] to a concrete type.
///
/// On failure the original value is handed back so it can be reported.
pub trait FromDriverValue: Sized {
    /// Exact downcast: succeeds only when the variant carries `Self` natively.
    fn from_driver_value(value: DriverValue) -> std::result::Result<Self, DriverValue>;

    /// Widening conversion tried in [`CoercionMode::Lenient`] after the
    /// exact downcast failed. Defaults to rejecting everything.
    fn coerce_driver_value(value: DriverValue) -> std::result::Result<Self, DriverValue> {
        Err(value)
    }
}

/// Hand a value to a storage driver without transforming it
pub trait ToDriverValue {
    fn to_driver_value(&self) -> DriverValue;
}

impl<T> Optional<T>
where
    T: FromDriverValue,
{
    /// Read a driver value into this `Optional` with exact type matching.
    ///
    /// `Null` empties the receiver. Any other value must carry `T` natively.
    /// On error the receiver is left as it was.
    pub fn scan(&mut self, value: DriverValue) -> Result<()> {
        self.scan_with(value, &ScanConfig::strict())
    }

    /// Like [`Optional::scan`], with coercion rules taken from `config`
    pub fn scan_with(&mut self, value: DriverValue, config: &ScanConfig) -> Result<()> {
        let blank = matches!(&value, DriverValue::Text(text) if text.is_empty());
        if value.is_null() || (blank && config.empty_text_is_null) {
            log::trace!("scanned NULL into Optional<{}>", std::any::type_name::<T>());
            self.set(None);
            return Ok(());
        }

        let scanned = match T::from_driver_value(value) {
            Ok(scanned) => scanned,
            Err(value) if config.mode == CoercionMode::Lenient => {
                let kind = value.kind();
                match T::coerce_driver_value(value) {
                    Ok(scanned) => {
                        log::debug!(
                            "coerced {} value into Optional<{}>",
                            kind,
                            std::any::type_name::<T>()
                        );
                        scanned
                    }
                    Err(value) => return Err(reject::<T>(&value)),
                }
            }
            Err(value) => return Err(reject::<T>(&value)),
        };

        log::trace!("scanned value into Optional<{}>", std::any::type_name::<T>());
        self.set(Some(scanned));
        Ok(())
    }

    /// Build an `Optional` straight from a driver value
    pub fn from_driver(value: DriverValue) -> Result<Self> {
        let mut scanned = Self::empty();
        scanned.scan(value)?;
        Ok(scanned)
    }
}

impl<T> Optional<T>
where
    T: ToDriverValue,
{
    /// The value to store: `Null` when empty, the held value otherwise
    pub fn value(&self) -> DriverValue {
        match self.get() {
            Some(value) => value.to_driver_value(),
            None => DriverValue::Null,
        }
    }
}

impl<T> ToDriverValue for Optional<T>
where
    T: ToDriverValue,
{
    fn to_driver_value(&self) -> DriverValue {
        self.value()
    }
}

fn reject<T>(value: &DriverValue) -> OptError {
    log::debug!(
        "cannot scan {} value into Optional<{}>",
        value.kind(),
        std::any::type_name::<T>()
    );
    OptError::scan::<T>(value)
}
