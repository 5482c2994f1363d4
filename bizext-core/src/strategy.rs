//! Interruption policy for combined dispatch.

/// Decides whether combined dispatch stops after an implementation's result.
///
/// Evaluated once per executed implementation, after its result has been
/// produced. Implementations that declined the context are never shown to
/// the strategy.
///
/// Any `Fn(&R) -> bool` closure is a strategy:
///
/// ```rust,ignore
/// executor.execute_all_with::<Lookup, _, _>(
///     &scenario,
///     &key,
///     |found: &Option<String>| found.is_some(),
///     VecReturnBuilder::new(),
/// )?;
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot interrupt on results of type `{R}`",
    label = "missing `InterruptionStrategy<{R}>` implementation",
    note = "Use a closure `Fn(&{R}) -> bool` or implement `InterruptionStrategy<{R}>`."
)]
pub trait InterruptionStrategy<R: ?Sized> {
    /// Returns `true` to stop processing further implementations.
    fn interrupt(&self, result: &R) -> bool;
}

/// The default policy: run every supporting implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInterrupt;

impl<R: ?Sized> InterruptionStrategy<R> for NeverInterrupt {
    fn interrupt(&self, _result: &R) -> bool {
        false
    }
}

impl<R, F> InterruptionStrategy<R> for F
where
    R: ?Sized,
    F: Fn(&R) -> bool,
{
    fn interrupt(&self, result: &R) -> bool {
        (self)(result)
    }
}
