//! # bizext - Extension Points with Scenario-Based Dispatch
//!
//! `bizext` lets an application declare named capabilities ("extension
//! points"), register several implementations of each under a three-level
//! business scenario (biz id, use case, scenario), and dispatch calls to the
//! right implementations at runtime.
//!
//! ## Quick Start
//!
//! ```rust
//! use bizext::prelude::*;
//! use std::sync::Arc;
//!
//! bizext::capability!(pub Say: str => String);
//!
//! struct SayA;
//! impl Extension<Say> for SayA {
//!     fn exec(&self, ctx: &str) -> Result<String, BoxError> {
//!         Ok(format!("A:{ctx}"))
//!     }
//! }
//!
//! struct SayB;
//! impl Extension<Say> for SayB {
//!     fn exec(&self, ctx: &str) -> Result<String, BoxError> {
//!         Ok(format!("B:{ctx}"))
//!     }
//! }
//!
//! # fn main() -> bizext::Result<()> {
//! let repository = Arc::new(ExtensionRepository::new());
//! let register = ExtensionRegister::new(repository.clone());
//!
//! let greet = Registration::new().with_biz_id("test").with_use_case("greet");
//! register.register::<Say, _>(SayA, &greet.clone().with_order(0))?;
//! register.register::<Say, _>(SayB, &greet.with_order(1))?;
//!
//! let executor = ExtensionExecutor::new(repository);
//! let scenario = BizScenario::of_use_case("test", "greet");
//!
//! assert_eq!(executor.execute::<Say>(&scenario, "hi")?.as_deref(), Some("A:hi"));
//! assert_eq!(executor.execute_all::<Say>(&scenario, "hi")?, ["A:hi", "B:hi"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - `bizext-core`: traits and value types, for crates that only implement extensions
//! - `bizext-std`: repository, register, executor, standard policies
//! - `bizext-macros`: the `#[extension]` attribute (feature `macros`)
//!
//! ## Features
//!
//! - `tracing` (default): registration and dispatch events via `tracing`
//! - `inventory`: distributed registration with [`CollectedExtension`]
//! - `macros` (default): `#[extension]`, implies `inventory`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Capability contract
pub use bizext_core::{
    AlwaysSupported, Capability, Extension, FnExtension, SupportPredicate, capability,
};

// Scenario model
pub use bizext_core::{
    BizScenario, DEFAULT_BIZ_ID, DEFAULT_SCENARIO, DEFAULT_USE_CASE, ExtensionCoordinate,
    HIGHEST_PRECEDENCE, IDENTITY_SEPARATOR, LOWEST_PRECEDENCE, Registration,
};

// Combined dispatch policies
pub use bizext_core::{
    CombinedReturnBuilder, InterruptionStrategy, NeverInterrupt, VecReturnBuilder,
};

// Errors
pub use bizext_core::{BoxError, ExtensionError, Result};

// Runtime
pub use bizext_std::{
    config::ExecutorConfig,
    executor::ExtensionExecutor,
    register::ExtensionRegister,
    repository::{ExtensionList, ExtensionRepository, RegisteredExtension},
};

// Distributed registration
#[cfg(feature = "inventory")]
pub use bizext_std::collected::{CollectedExtension, InstallFn, collected, install_default};

/// Interruption strategies for combined dispatch.
pub mod strategies {
    pub use bizext_core::{InterruptionStrategy, NeverInterrupt};
    pub use bizext_std::strategies::{InterruptOnFirst, InterruptOnPresent, Presence};
}

/// Result builders for combined dispatch.
pub mod builders {
    pub use bizext_core::{CombinedReturnBuilder, VecReturnBuilder};
    pub use bizext_std::builders::{FlattenReturnBuilder, FoldReturnBuilder};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use bizext_std::testing::*;
}

/// Prelude module - common imports for bizext.
///
/// # Usage
///
/// ```rust,ignore
/// use bizext::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BizScenario, BoxError, Capability, CombinedReturnBuilder, ExecutorConfig, Extension,
        ExtensionError, ExtensionExecutor, ExtensionRegister, ExtensionRepository,
        InterruptionStrategy, Registration,
    };
}

#[cfg(feature = "macros")]
pub use bizext_macros::extension;

#[cfg(feature = "inventory")]
pub use inventory;
