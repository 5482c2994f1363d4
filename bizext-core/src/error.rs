//! Error types for bizext.
//!
//! Every failure of the registry or the executor surfaces as an
//! [`ExtensionError`]. Errors raised by an implementation's `exec` travel
//! inside [`ExtensionError::Execution`] untouched.

use crate::coordinate::ExtensionCoordinate;
use thiserror::Error;

/// A boxed error type for implementation failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout bizext.
pub type Result<T, E = ExtensionError> = std::result::Result<T, E>;

/// Errors produced while registering or dispatching extensions.
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// The same concrete type was registered twice under one coordinate.
    #[error("duplicate registration of `{implementation}` at {coordinate}")]
    DuplicateRegistration {
        /// The occupied coordinate.
        coordinate: ExtensionCoordinate,
        /// Type name of the rejected implementation.
        implementation: &'static str,
    },

    /// No coordinate in the fallback chain has any implementation.
    #[error("no extension found for capability `{capability}` with scenario `{scenario}`")]
    CapabilityNotFound {
        /// Capability id that was looked up.
        capability: String,
        /// Identity of the requested scenario.
        scenario: String,
    },

    /// Coordinates matched, but every implementation declined the context.
    #[error(
        "no extension of capability `{capability}` supports the context for scenario `{scenario}`"
    )]
    NoSupportingImplementation {
        /// Capability id that was looked up.
        capability: String,
        /// Identity of the requested scenario.
        scenario: String,
    },

    /// An entry stored under the capability id belongs to another capability type.
    #[error("`{implementation}` is registered under `{capability}` for a different capability type")]
    CapabilityMismatch {
        /// Capability id that was looked up.
        capability: String,
        /// Type name of the mismatched implementation.
        implementation: &'static str,
    },

    /// A scenario identity string could not be parsed.
    #[error("invalid scenario identity: {0:?}")]
    InvalidIdentity(String),

    /// An implementation failed during `exec`.
    #[error(transparent)]
    Execution(BoxError),
}

impl ExtensionError {
    /// Whether this error means "nothing could handle the call".
    ///
    /// Both [`CapabilityNotFound`](Self::CapabilityNotFound) and
    /// [`NoSupportingImplementation`](Self::NoSupportingImplementation) count.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ExtensionError::CapabilityNotFound { .. }
                | ExtensionError::NoSupportingImplementation { .. }
        )
    }

    /// Recover the implementation's own error, if this is an execution failure.
    pub fn into_execution_error(self) -> Option<BoxError> {
        match self {
            ExtensionError::Execution(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoxError> for ExtensionError {
    fn from(err: BoxError) -> Self {
        ExtensionError::Execution(err)
    }
}
