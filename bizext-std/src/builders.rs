//! Standard combined-result builders.
//!
//! [`VecReturnBuilder`](bizext_core::VecReturnBuilder), the default, lives in
//! `bizext-core`.

use bizext_core::CombinedReturnBuilder;

/// Folds each result into an accumulator.
///
/// # Example
/// ```ignore
/// let total = executor.execute_all_with::<Discount, _, _>(
///     &scenario,
///     &order,
///     NeverInterrupt,
///     FoldReturnBuilder::new(0u64, |total: &mut u64, cents| *total += cents),
/// )?;
/// ```
pub struct FoldReturnBuilder<A, F> {
    acc: A,
    fold: F,
}

impl<A, F> FoldReturnBuilder<A, F> {
    /// Start from `init`.
    pub fn new(init: A, fold: F) -> Self {
        Self { acc: init, fold }
    }
}

impl<R, A, F> CombinedReturnBuilder<R> for FoldReturnBuilder<A, F>
where
    F: FnMut(&mut A, R),
{
    type Output = A;

    fn append(&mut self, result: R) {
        (self.fold)(&mut self.acc, result);
    }

    fn build(self) -> A {
        self.acc
    }
}

/// Concatenates `Vec` results into one `Vec`, in execution order.
#[derive(Debug, Clone)]
pub struct FlattenReturnBuilder<T> {
    items: Vec<T>,
}

impl<T> FlattenReturnBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Default for FlattenReturnBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I> CombinedReturnBuilder<I> for FlattenReturnBuilder<T>
where
    I: IntoIterator<Item = T>,
{
    type Output = Vec<T>;

    fn append(&mut self, result: I) {
        self.items.extend(result);
    }

    fn build(self) -> Vec<T> {
        self.items
    }
}
