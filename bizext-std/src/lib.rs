//! # bizext-std
//!
//! Standard runtime for the bizext extension-point framework.
//!
//! This crate provides:
//! - **Storage**: [`ExtensionRepository`](repository::ExtensionRepository), the concurrent coordinate → implementations map
//! - **Registration**: [`ExtensionRegister`](register::ExtensionRegister), plus `inventory` collection behind the
//!   `inventory` feature
//! - **Dispatch**: [`ExtensionExecutor`](executor::ExtensionExecutor) with single and combined dispatch
//! - **Policies**: standard interruption strategies and result builders
//! - **Testing**: helpers in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use bizext_core;

// Modules
pub mod builders;
#[cfg(feature = "inventory")]
pub mod collected;
pub mod config;
pub mod executor;
pub mod register;
pub mod repository;
pub mod strategies;
pub mod testing;

#[cfg(feature = "inventory")]
pub use inventory;
