//! A generic optional value with JSON and SQL storage conversions.
//!
//! [`Optional<T>`] holds either a value of `T` or nothing. It converts
//! across three boundaries:
//!
//! - JSON, where an empty value is `null` and a present one is written bare
//!   (see [`Optional::marshal_json`] and [`Optional::unmarshal_json`]),
//! - a storage driver's closed value domain, [`DriverValue`]
//!   (see [`Optional::scan`] and [`Optional::value`]),
//! - sqlx, through `Type`, `Encode` and `Decode` implementations.
//!
//! ```
//! use opt_value::Optional;
//!
//! let name = Optional::of("hello".to_string());
//! assert_eq!(name.to_json_string().unwrap(), r#""hello""#);
//!
//! let mut parsed = Optional::<String>::empty();
//! parsed.unmarshal_json(b"null").unwrap();
//! assert!(!parsed.exists());
//! ```

pub mod config;
pub mod driver;
pub mod error;
mod json;
pub mod optional;

pub use config::{CoercionMode, ScanConfig};
pub use driver::{DriverValue, FromDriverValue, ToDriverValue};
pub use error::{OptError, Result};
pub use optional::{Optional, flat_map, if_present};
