//! The `Optional<T>` container
//!
//! An `Optional` either holds a value of `T` or holds nothing. The checked
//! accessor [`Optional::get`] always hands back the presence flag together
//! with the value, so callers cannot read a value without first seeing
//! whether there is one. [`Optional::must_get`] is the unchecked escape
//! hatch and panics when the value is absent.

mod transform;

pub use transform::{flat_map, if_present};

/// A value of type `T` that may or may not be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Optional<T> {
    inner: Option<T>,
}

impl<T> Optional<T> {
    /// Create an `Optional` without a value
    pub const fn empty() -> Self {
        Self { inner: None }
    }

    /// Create an `Optional` holding `value`
    pub const fn of(value: T) -> Self {
        Self { inner: Some(value) }
    }

    pub fn from_option(value: Option<T>) -> Self {
        Self { inner: value }
    }

    pub fn into_option(self) -> Option<T> {
        self.inner
    }

    /// Checked accessor: the held value, or `None` when absent
    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    /// Whether a value is present
    pub fn exists(&self) -> bool {
        self.inner.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Return the held value, or `default` when absent
    pub fn get_or_else(self, default: T) -> T {
        match self.inner {
            Some(value) => value,
            None => default,
        }
    }

    /// Return the held value, panicking when absent.
    ///
    /// Only call this where the surrounding logic has already established
    /// that the value exists. Absence here is a bug in the caller, so it is
    /// reported loudly instead of through an error value.
    ///
    /// # Panics
    ///
    /// Panics if the `Optional` is empty.
    #[track_caller]
    pub fn must_get(self) -> T {
        match self.inner {
            Some(value) => value,
            None => panic!("must_get() called on an Optional that holds no value"),
        }
    }

    /// Borrowing variant of [`Optional::must_get`].
    ///
    /// # Panics
    ///
    /// Panics if the `Optional` is empty.
    #[track_caller]
    pub fn must_get_ref(&self) -> &T {
        match &self.inner {
            Some(value) => value,
            None => panic!("must_get_ref() called on an Optional that holds no value"),
        }
    }

    pub fn as_ref(&self) -> Optional<&T> {
        Optional {
            inner: self.inner.as_ref(),
        }
    }

    pub fn as_mut(&mut self) -> Optional<&mut T> {
        Optional {
            inner: self.inner.as_mut(),
        }
    }

    /// Move the value out, leaving this `Optional` empty
    pub fn take(&mut self) -> Optional<T> {
        Optional {
            inner: self.inner.take(),
        }
    }

    /// Store `value`, returning whatever was held before
    pub fn replace(&mut self, value: T) -> Optional<T> {
        Optional {
            inner: self.inner.replace(value),
        }
    }

    pub fn iter(&self) -> std::option::Iter<'_, T> {
        self.inner.iter()
    }

    pub(crate) fn set(&mut self, value: Option<T>) {
        self.inner = value;
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.inner
    }
}

impl<T> IntoIterator for Optional<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Optional<T> {
    type Item = &'a T;
    type IntoIter = std::option::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
