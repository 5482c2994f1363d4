//! # bizext-core
//!
//! Core traits and value types for the bizext extension-point runtime.
//!
//! This crate has minimal dependencies and is meant to be imported by crates
//! that only *implement* extensions, without pulling in the repository and
//! executor from `bizext-std`.
//!
//! # Model
//!
//! ## Capability ([`Capability`])
//!
//! A pluggable behavior with a stable name. Declared once as a marker type
//! that fixes the context and output types of every implementation.
//!
//! ## Extension ([`Extension`])
//!
//! One implementation of a capability: a `support` predicate and an `exec`
//! function over the caller's context.
//!
//! ## Scenario ([`BizScenario`])
//!
//! The three-level business key (biz id, use case, scenario) that selects
//! among implementations, with a fixed fallback chain toward the defaults.
//!
//! ## Coordinate ([`ExtensionCoordinate`])
//!
//! `(capability id, scenario identity)`, the key of the repository.
//!
//! ## Combined dispatch policies
//!
//! - [`InterruptionStrategy`] - decides whether to stop after a result
//! - [`CombinedReturnBuilder`] - folds per-implementation results into one value
//!
//! # Error Types
//!
//! - [`ExtensionError`] - every registration and dispatch failure
//! - [`BoxError`] - errors raised by implementations

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod combine;
mod coordinate;
mod error;
mod extension;
mod registration;
mod scenario;
mod strategy;

// Re-exports
pub use combine::{CombinedReturnBuilder, VecReturnBuilder};
pub use coordinate::ExtensionCoordinate;
pub use error::{BoxError, ExtensionError, Result};
pub use extension::{AlwaysSupported, Capability, Extension, FnExtension, SupportPredicate};
pub use registration::{HIGHEST_PRECEDENCE, LOWEST_PRECEDENCE, Registration};
pub use scenario::{
    BizScenario, DEFAULT_BIZ_ID, DEFAULT_SCENARIO, DEFAULT_USE_CASE, IDENTITY_SEPARATOR,
};
pub use strategy::{InterruptionStrategy, NeverInterrupt};
