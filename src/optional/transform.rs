//! Transformations that build a new `Optional` from an existing one

use super::Optional;

/// Apply `handler` to the value of `input` if there is one.
///
/// The handler is not called when `input` is empty.
pub fn if_present<T, R, F>(input: Optional<T>, handler: F) -> Optional<R>
where
    F: FnOnce(T) -> R,
{
    input.map(handler)
}

/// Like [`if_present`], but the handler decides presence of the result
/// itself. Its return value is passed through without re-wrapping.
pub fn flat_map<T, R, F>(input: Optional<T>, handler: F) -> Optional<R>
where
    F: FnOnce(T) -> Optional<R>,
{
    input.and_then(handler)
}

impl<T> Optional<T> {
    pub fn map<R, F>(self, handler: F) -> Optional<R>
    where
        F: FnOnce(T) -> R,
    {
        match self.into_option() {
            Some(value) => Optional::of(handler(value)),
            None => Optional::empty(),
        }
    }

    pub fn and_then<R, F>(self, handler: F) -> Optional<R>
    where
        F: FnOnce(T) -> Optional<R>,
    {
        match self.into_option() {
            Some(value) => handler(value),
            None => Optional::empty(),
        }
    }

    /// Keep `self` if it holds a value, otherwise hold `default`.
    /// The result is always present.
    pub fn or_else(self, default: T) -> Optional<T> {
        if self.exists() {
            self
        } else {
            Optional::of(default)
        }
    }

    /// Keep the value only if `predicate` accepts it
    pub fn filter<P>(self, predicate: P) -> Optional<T>
    where
        P: FnOnce(&T) -> bool,
    {
        let keep = self.get().is_some_and(predicate);
        if keep { self } else { Optional::empty() }
    }
}
