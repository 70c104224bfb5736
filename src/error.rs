//! Error type for the conversion boundaries of [`Optional`](crate::Optional)

use thiserror::Error;

/// Recoverable failures raised while converting an `Optional` to or from
/// an external representation.
///
/// Misuse of the unchecked accessor is not represented here; that panics.
#[derive(Error, Debug)]
pub enum OptError {
    #[error("failed to encode optional value as JSON: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode {target} from JSON: {source}")]
    Decode {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to scan a '{value}' into an Optional<{target}>")]
    Scan { value: String, target: &'static str },
    #[error("invalid scan configuration: {source}")]
    Config {
        #[from]
        source: toml::de::Error,
    },
    #[error("failed to read scan configuration {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OptError {
    pub(crate) fn scan<T>(value: &crate::DriverValue) -> Self {
        OptError::Scan {
            value: value.to_string(),
            target: std::any::type_name::<T>(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OptError>;
