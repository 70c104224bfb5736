//! JSON conversion for `Optional`
//!
//! The optionality is erased on the wire: an empty `Optional` is written as
//! `null` and a present one as the bare value, with no wrapper object. When
//! reading, `null` always means empty, even if `T` could accept `null` on
//! its own.
//!
//! Struct fields of type `Optional<T>` need `#[serde(default)]` to be
//! allowed to be missing from the input.

use crate::error::{OptError, Result};
use crate::optional::Optional;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl<T> Serialize for Optional<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.get() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Optional<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Optional::from_option)
    }
}

impl<T> Optional<T>
where
    T: Serialize,
{
    /// Encode as JSON bytes: `null` when empty, the value's own encoding otherwise
    pub fn marshal_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|source| OptError::Encode { source })
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|source| OptError::Encode { source })
    }
}

impl<T> Optional<T>
where
    T: DeserializeOwned,
{
    /// Decode `data` into this `Optional` in place.
    ///
    /// `null` empties the receiver, anything else must decode as `T`. On
    /// error the receiver keeps whatever it held before the call.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        let decoded = Self::from_json_slice(data)?;
        log::trace!(
            "unmarshalled Optional<{}> (present: {})",
            std::any::type_name::<T>(),
            decoded.exists()
        );
        *self = decoded;
        Ok(())
    }

    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|source| {
            log::debug!(
                "rejected JSON input for Optional<{}>: {}",
                std::any::type_name::<T>(),
                source
            );
            OptError::Decode {
                target: std::any::type_name::<T>(),
                source,
            }
        })
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        Self::from_json_slice(data.as_bytes())
    }
}
