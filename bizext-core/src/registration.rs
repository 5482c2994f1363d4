//! Declarative registration metadata.
//!
//! A [`Registration`] is the plain-data equivalent of an `@Extension`-style
//! annotation: it says under which scenarios, and at which order, an
//! implementation is stored.

use crate::scenario::{BizScenario, DEFAULT_BIZ_ID, DEFAULT_SCENARIO, DEFAULT_USE_CASE};

/// Order given to registrations that do not set one. Runs last.
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// Order that runs before every other registration.
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// Where and in which order an implementation is registered.
///
/// Each level may list several values; the implementation is registered
/// under every combination of them (see [`scenarios`](Self::scenarios)).
///
/// # Example
/// ```ignore
/// let meta = Registration::new()
///     .with_biz_id("tmall")
///     .with_use_cases(["placeOrder", "cancelOrder"])
///     .with_order(10);
///
/// assert_eq!(meta.scenarios().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    biz_ids: Vec<String>,
    use_cases: Vec<String>,
    scenarios: Vec<String>,
    order: i32,
}

impl Default for Registration {
    fn default() -> Self {
        Self::new()
    }
}

impl Registration {
    /// Registration under the all-defaults scenario with the lowest precedence.
    pub fn new() -> Self {
        Self {
            biz_ids: vec![DEFAULT_BIZ_ID.to_string()],
            use_cases: vec![DEFAULT_USE_CASE.to_string()],
            scenarios: vec![DEFAULT_SCENARIO.to_string()],
            order: LOWEST_PRECEDENCE,
        }
    }

    /// Registration under exactly one scenario.
    pub fn for_scenario(scenario: &BizScenario) -> Self {
        Self::new()
            .with_biz_id(scenario.biz_id())
            .with_use_case(scenario.use_case())
            .with_scenario(scenario.scenario())
    }

    /// Set a single biz id.
    pub fn with_biz_id(mut self, biz_id: impl Into<String>) -> Self {
        self.biz_ids = vec![biz_id.into()];
        self
    }

    /// Set a single use case.
    pub fn with_use_case(mut self, use_case: impl Into<String>) -> Self {
        self.use_cases = vec![use_case.into()];
        self
    }

    /// Set a single scenario.
    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenarios = vec![scenario.into()];
        self
    }

    /// Set several biz ids. An empty list keeps the default.
    pub fn with_biz_ids<I, S>(mut self, biz_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.biz_ids = collect_or_default(biz_ids, DEFAULT_BIZ_ID);
        self
    }

    /// Set several use cases. An empty list keeps the default.
    pub fn with_use_cases<I, S>(mut self, use_cases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.use_cases = collect_or_default(use_cases, DEFAULT_USE_CASE);
        self
    }

    /// Set several scenarios. An empty list keeps the default.
    pub fn with_scenarios<I, S>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scenarios = collect_or_default(scenarios, DEFAULT_SCENARIO);
        self
    }

    /// Set the order. Lower runs first.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// The declared order.
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Every scenario this registration covers, without repeats.
    ///
    /// Iterates biz ids, then use cases, then scenarios, so the result is
    /// deterministic for a given registration.
    pub fn scenarios(&self) -> Vec<BizScenario> {
        let mut out: Vec<BizScenario> = Vec::with_capacity(
            self.biz_ids.len() * self.use_cases.len() * self.scenarios.len(),
        );
        for biz_id in &self.biz_ids {
            for use_case in &self.use_cases {
                for scenario in &self.scenarios {
                    let candidate = BizScenario::new(biz_id, use_case, scenario);
                    if !out.contains(&candidate) {
                        out.push(candidate);
                    }
                }
            }
        }
        out
    }
}

fn collect_or_default<I, S>(values: I, default: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        vec![default.to_string()]
    } else {
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let meta = Registration::new();
        assert_eq!(meta.order(), LOWEST_PRECEDENCE);
        assert_eq!(meta.scenarios(), vec![BizScenario::default()]);
    }

    #[test]
    fn test_for_scenario_round_trips() {
        let scenario = BizScenario::new("x", "y", "z");
        let meta = Registration::for_scenario(&scenario).with_order(3);
        assert_eq!(meta.scenarios(), vec![scenario]);
        assert_eq!(meta.order(), 3);
    }

    #[test]
    fn test_cartesian_product() {
        let meta = Registration::new()
            .with_biz_ids(["a", "b"])
            .with_use_cases(["u"])
            .with_scenarios(["s1", "s2"]);
        let identities: Vec<String> = meta
            .scenarios()
            .iter()
            .map(|s| s.unique_identity().to_string())
            .collect();
        assert_eq!(identities, ["a.u.s1", "a.u.s2", "b.u.s1", "b.u.s2"]);
    }

    #[test]
    fn test_repeats_and_empty_lists() {
        let meta = Registration::new()
            .with_biz_ids(["a", "a"])
            .with_use_cases(Vec::<String>::new());
        let scenarios = meta.scenarios();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0], BizScenario::of_biz("a"));
    }
}
