//! Standard interruption strategies.

use bizext_core::InterruptionStrategy;
use std::collections::{BTreeMap, HashMap};

/// Stops after the first implementation that actually ran.
///
/// Turns combined dispatch into "first supporting implementation, as a
/// one-element aggregate".
#[derive(Debug, Clone, Copy, Default)]
pub struct InterruptOnFirst;

impl<R: ?Sized> InterruptionStrategy<R> for InterruptOnFirst {
    fn interrupt(&self, _result: &R) -> bool {
        true
    }
}

/// Whether a result carries a value.
pub trait Presence {
    /// `true` when the result is non-null / non-empty.
    fn is_present(&self) -> bool;
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl<K, V, S> Presence for HashMap<K, V, S> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Presence for BTreeMap<K, V> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence + ?Sized> Presence for Box<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl<T: Presence, E> Presence for Result<T, E> {
    fn is_present(&self) -> bool {
        self.as_ref().is_ok_and(Presence::is_present)
    }
}

/// Stops once a result carries a value (see [`Presence`]).
///
/// # Example
/// ```ignore
/// // Ask providers in order until one knows the answer.
/// let answers = executor.execute_all_with::<Lookup, _, _>(
///     &scenario,
///     &key,
///     InterruptOnPresent,
///     VecReturnBuilder::new(),
/// )?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InterruptOnPresent;

impl<R: Presence + ?Sized> InterruptionStrategy<R> for InterruptOnPresent {
    fn interrupt(&self, result: &R) -> bool {
        result.is_present()
    }
}
