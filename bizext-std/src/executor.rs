//! # Dispatch
//!
//! The [`ExtensionExecutor`] resolves a [`BizScenario`] against the
//! repository and runs the matching implementations of a capability.
//!
//! # Resolution
//!
//! Coordinates are probed from the most specific scenario toward the
//! all-defaults one (see [`BizScenario::fallback_chain`]).
//!
//! # Single dispatch
//!
//! [`execute`](ExtensionExecutor::execute) runs exactly one implementation:
//! the lowest-order entry whose `support` accepts the context. When every
//! entry of a coordinate declines, the next coordinate of the chain is tried.
//!
//! # Combined dispatch
//!
//! [`execute_all_with`](ExtensionExecutor::execute_all_with) runs every
//! supporting entry of the first non-empty coordinate, in order, feeding each
//! result to a [`CombinedReturnBuilder`] and stopping early when the
//! [`InterruptionStrategy`] says so. The first failing `exec` aborts the call
//! and the partial aggregate is dropped: there is no partial-success return.
//!
//! All work runs on the calling thread.

use crate::{
    config::ExecutorConfig,
    repository::{ExtensionList, ExtensionRepository, RegisteredExtension},
};
use bizext_core::{
    BizScenario, Capability, CombinedReturnBuilder, Extension, ExtensionCoordinate,
    ExtensionError, InterruptionStrategy, NeverInterrupt, Result, VecReturnBuilder,
};
use std::sync::Arc;

/// Resolves scenarios and dispatches calls to registered extensions.
#[derive(Debug, Clone)]
pub struct ExtensionExecutor {
    repository: Arc<ExtensionRepository>,
    config: ExecutorConfig,
}

impl ExtensionExecutor {
    /// Create an executor with the default (lenient) configuration.
    pub fn new(repository: Arc<ExtensionRepository>) -> Self {
        Self::with_config(repository, ExecutorConfig::default())
    }

    /// Create an executor with an explicit configuration.
    pub fn with_config(repository: Arc<ExtensionRepository>, config: ExecutorConfig) -> Self {
        Self { repository, config }
    }

    /// The dispatch configuration.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// The repository dispatch reads from.
    pub fn repository(&self) -> &Arc<ExtensionRepository> {
        &self.repository
    }

    /// Run the single winning implementation of `C` for `scenario`.
    ///
    /// Returns `Ok(None)` when nothing handles the call and the configuration
    /// is lenient.
    ///
    /// # Errors
    ///
    /// - [`ExtensionError::Execution`] with the implementation's own error
    /// - [`ExtensionError::CapabilityNotFound`] /
    ///   [`ExtensionError::NoSupportingImplementation`] when nothing handles
    ///   the call and `not_found_fatal` is set
    pub fn execute<C: Capability>(
        &self,
        scenario: &BizScenario,
        ctx: &C::Context,
    ) -> Result<Option<C::Output>> {
        let Some(extension) = self.locate_supporting::<C>(scenario, ctx)? else {
            return Ok(None);
        };
        extension
            .exec(ctx)
            .map(Some)
            .map_err(ExtensionError::Execution)
    }

    /// Run every supporting implementation and collect the results in order.
    pub fn execute_all<C: Capability>(
        &self,
        scenario: &BizScenario,
        ctx: &C::Context,
    ) -> Result<Vec<C::Output>> {
        self.execute_all_with::<C, _, _>(scenario, ctx, NeverInterrupt, VecReturnBuilder::new())
    }

    /// Combined dispatch with an explicit interruption strategy and builder.
    ///
    /// `strategy` sees each result before it is appended to `builder`.
    /// Implementations whose `support` declines are skipped and never shown
    /// to the strategy.
    ///
    /// # Errors
    ///
    /// - [`ExtensionError::Execution`] from the first failing implementation;
    ///   results gathered so far are discarded
    /// - [`ExtensionError::CapabilityNotFound`] when no coordinate resolves
    ///   and `not_found_fatal` is set
    pub fn execute_all_with<C, S, B>(
        &self,
        scenario: &BizScenario,
        ctx: &C::Context,
        strategy: S,
        mut builder: B,
    ) -> Result<B::Output>
    where
        C: Capability,
        S: InterruptionStrategy<C::Output>,
        B: CombinedReturnBuilder<C::Output>,
    {
        let Some((coordinate, entries)) = self.resolve(C::ID, scenario) else {
            self.unresolved(C::ID, scenario, false)?;
            return Ok(builder.build());
        };

        let mut executed = 0usize;
        for entry in entries.iter() {
            let extension = downcast::<C>(entry)?;
            if !extension.support(ctx) {
                continue;
            }

            let result = extension.exec(ctx).map_err(ExtensionError::Execution)?;
            executed += 1;
            let stop = strategy.interrupt(&result);
            builder.append(result);

            if stop {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    coordinate = %coordinate,
                    implementation = entry.type_name(),
                    executed,
                    "Combined dispatch interrupted"
                );
                break;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(coordinate = %coordinate, executed, "Combined dispatch finished");
        #[cfg(not(feature = "tracing"))]
        let _ = (coordinate, executed);

        Ok(builder.build())
    }

    /// Every implementation of the first non-empty coordinate, in order.
    ///
    /// Unlike dispatch, `support` is not consulted.
    pub fn locate<C: Capability>(&self, scenario: &BizScenario) -> Result<Vec<Arc<dyn Extension<C>>>> {
        let Some((_, entries)) = self.resolve(C::ID, scenario) else {
            self.unresolved(C::ID, scenario, false)?;
            return Ok(Vec::new());
        };
        entries
            .iter()
            .map(|entry| downcast::<C>(entry).map(Arc::clone))
            .collect()
    }

    /// The implementation single dispatch would run, without running it.
    pub fn locate_supporting<C: Capability>(
        &self,
        scenario: &BizScenario,
        ctx: &C::Context,
    ) -> Result<Option<Arc<dyn Extension<C>>>> {
        let mut matched = false;

        for coordinate in ExtensionCoordinate::resolve(C::ID, scenario) {
            let Some(entries) = self.non_empty(&coordinate) else {
                continue;
            };
            matched = true;

            for entry in entries.iter() {
                let extension = downcast::<C>(entry)?;
                if extension.support(ctx) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        coordinate = %coordinate,
                        implementation = entry.type_name(),
                        "Selected extension"
                    );
                    return Ok(Some(Arc::clone(extension)));
                }
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(coordinate = %coordinate, "No extension supports the context, falling back");
        }

        self.unresolved(C::ID, scenario, matched)?;
        Ok(None)
    }

    /// First coordinate of the chain with a non-empty list.
    fn resolve(
        &self,
        capability: &str,
        scenario: &BizScenario,
    ) -> Option<(ExtensionCoordinate, ExtensionList)> {
        ExtensionCoordinate::resolve(capability, scenario)
            .into_iter()
            .find_map(|coordinate| {
                let entries = self.non_empty(&coordinate)?;
                Some((coordinate, entries))
            })
    }

    fn non_empty(&self, coordinate: &ExtensionCoordinate) -> Option<ExtensionList> {
        let entries = self.repository.find(coordinate).filter(|list| !list.is_empty());
        #[cfg(feature = "tracing")]
        if entries.is_none() {
            tracing::trace!(coordinate = %coordinate, "No extensions at coordinate");
        }
        entries
    }

    /// Applies the not-found policy; `matched` tells whether any coordinate
    /// had implementations that all declined.
    fn unresolved(&self, capability: &str, scenario: &BizScenario, matched: bool) -> Result<()> {
        let capability = capability.to_string();
        let scenario = scenario.unique_identity().to_string();
        let err = if matched {
            ExtensionError::NoSupportingImplementation {
                capability,
                scenario,
            }
        } else {
            ExtensionError::CapabilityNotFound {
                capability,
                scenario,
            }
        };

        if self.config.not_found_fatal() {
            return Err(err);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(error = %err, "Unresolved extension lookup, returning empty result");
        Ok(())
    }
}

fn downcast<C: Capability>(entry: &RegisteredExtension) -> Result<&Arc<dyn Extension<C>>> {
    entry
        .downcast::<C>()
        .ok_or_else(|| ExtensionError::CapabilityMismatch {
            capability: C::ID.to_string(),
            implementation: entry.type_name(),
        })
}
