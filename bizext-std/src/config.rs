//! Executor configuration.

/// Settings for an [`ExtensionExecutor`](crate::executor::ExtensionExecutor).
///
/// # Example
/// ```ignore
/// let config = ExecutorConfig::new().with_not_found_fatal(true);
/// let executor = ExtensionExecutor::with_config(repository, config);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorConfig {
    not_found_fatal: bool,
}

impl ExecutorConfig {
    /// Lenient defaults: an unresolved lookup yields an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration where an unresolved lookup is an error.
    pub fn strict() -> Self {
        Self::new().with_not_found_fatal(true)
    }

    /// Set whether an unresolved lookup is an error.
    ///
    /// When `false`, single dispatch returns `Ok(None)` and combined dispatch
    /// returns the builder's empty aggregate.
    pub fn with_not_found_fatal(mut self, fatal: bool) -> Self {
        self.not_found_fatal = fatal;
        self
    }

    /// Whether unresolved lookups are errors.
    pub fn not_found_fatal(&self) -> bool {
        self.not_found_fatal
    }
}
