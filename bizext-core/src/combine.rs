//! Aggregation of per-implementation results in combined dispatch.

/// Accumulates the results of one combined dispatch into an aggregate.
///
/// A builder is created per call, fed in execution order and consumed by
/// [`build`](Self::build). It is never shared between calls.
pub trait CombinedReturnBuilder<R> {
    /// The aggregate returned to the caller.
    type Output;

    /// Feed one implementation's result.
    fn append(&mut self, result: R);

    /// Finish and return the aggregate.
    fn build(self) -> Self::Output;
}

/// The default builder: collects results into a `Vec` in execution order.
#[derive(Debug, Clone)]
pub struct VecReturnBuilder<R> {
    results: Vec<R>,
}

impl<R> VecReturnBuilder<R> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    /// Number of results appended so far.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<R> Default for VecReturnBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> CombinedReturnBuilder<R> for VecReturnBuilder<R> {
    type Output = Vec<R>;

    fn append(&mut self, result: R) {
        self.results.push(result);
    }

    fn build(self) -> Vec<R> {
        self.results
    }
}
