//! Testing utilities for bizext.
//!
//! - [`CallLog`]: a shared journal of which implementations ran
//! - [`StaticExtension`]: returns a fixed value, optionally declining
//! - [`FailingExtension`]: always fails with [`TestFailure`]
//!
//! Duplicate detection works on concrete types, so the helpers carry a
//! `TAG` const parameter: `StaticExtension::<_, 1>` and
//! `StaticExtension::<_, 2>` can share a coordinate.

use bizext_core::{BoxError, Capability, Extension};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// A clonable journal shared by test extensions.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// register.register_at::<Say, _>(StaticExtension::<_, 0>::new("a").logged(&log), &s, 0)?;
///
/// executor.execute_all::<Say>(&s, "ctx")?;
/// assert_eq!(log.entries(), ["a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn record(&self, label: impl Into<String>) {
        self.entries.lock().push(label.into());
    }

    /// A copy of the recorded labels, in call order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// An extension returning a clone of a fixed value.
pub struct StaticExtension<T, const TAG: usize = 0> {
    value: T,
    label: String,
    supports: bool,
    log: Option<CallLog>,
}

impl<T, const TAG: usize> StaticExtension<T, TAG> {
    /// Supports every context and returns `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            label: format!("static-{}", TAG),
            supports: true,
            log: None,
        }
    }

    /// Decline every context.
    pub fn declining(mut self) -> Self {
        self.supports = false;
        self
    }

    /// Label written to the log on each `exec`.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Record each `exec` into `log`.
    pub fn logged(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }
}

impl<C, T, const TAG: usize> Extension<C> for StaticExtension<T, TAG>
where
    C: Capability<Output = T>,
    T: Clone + Send + Sync + 'static,
{
    fn support(&self, _ctx: &C::Context) -> bool {
        self.supports
    }

    fn exec(&self, _ctx: &C::Context) -> Result<T, BoxError> {
        if let Some(log) = &self.log {
            log.record(self.label.clone());
        }
        Ok(self.value.clone())
    }
}

/// The error raised by [`FailingExtension`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("test extension `{0}` failed")]
pub struct TestFailure(pub String);

/// An extension whose `exec` always fails.
pub struct FailingExtension<const TAG: usize = 0> {
    label: String,
    log: Option<CallLog>,
}

impl<const TAG: usize> FailingExtension<TAG> {
    /// Create a failing extension labeled `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            log: None,
        }
    }

    /// Record each attempted `exec` into `log`.
    pub fn logged(mut self, log: &CallLog) -> Self {
        self.log = Some(log.clone());
        self
    }
}

impl<C: Capability, const TAG: usize> Extension<C> for FailingExtension<TAG> {
    fn exec(&self, _ctx: &C::Context) -> Result<C::Output, BoxError> {
        if let Some(log) = &self.log {
            log.record(self.label.clone());
        }
        Err(Box::new(TestFailure(self.label.clone())))
    }
}
