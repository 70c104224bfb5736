//! Scan configuration
//!
//! Controls how [`Optional::scan_with`](crate::Optional::scan_with) narrows
//! driver values. Can be written in TOML:
//!
//! ```toml
//! mode = "lenient"
//! empty_text_is_null = true
//! ```

use crate::error::{OptError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How strictly driver values are matched against the target type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionMode {
    /// Exact downcast only
    #[default]
    Strict,
    /// Fall back to the widening rules of `FromDriverValue::coerce_driver_value`
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub mode: CoercionMode,
    /// Treat an empty text value like `NULL`
    pub empty_text_is_null: bool,
}

impl ScanConfig {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            mode: CoercionMode::Lenient,
            ..Self::default()
        }
    }

    pub fn with_empty_text_is_null(mut self, enabled: bool) -> Self {
        self.empty_text_is_null = enabled;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        log::debug!("Loaded scan config: {:?}", config);
        Ok(config)
    }

    /// Load from a TOML file. A missing file yields the default config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("Scan config {:?} doesn't exist, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| OptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
