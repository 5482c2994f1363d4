//! Registry key pairing a capability with a scenario identity.

use crate::scenario::BizScenario;
use std::fmt;

/// The compound key used to index the extension repository.
///
/// Equality and hashing cover `(capability_id, scenario_identity)` and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionCoordinate {
    capability_id: String,
    scenario_identity: String,
}

impl ExtensionCoordinate {
    /// Create a coordinate from a capability id and a scenario identity string.
    pub fn new(capability_id: impl Into<String>, scenario_identity: impl Into<String>) -> Self {
        Self {
            capability_id: capability_id.into(),
            scenario_identity: scenario_identity.into(),
        }
    }

    /// Create a coordinate for an exact scenario.
    pub fn of(capability_id: impl Into<String>, scenario: &BizScenario) -> Self {
        Self::new(capability_id, scenario.unique_identity())
    }

    /// The capability half of the key.
    pub fn capability_id(&self) -> &str {
        &self.capability_id
    }

    /// The scenario identity half of the key.
    pub fn scenario_identity(&self) -> &str {
        &self.scenario_identity
    }

    /// The lookup order for `capability_id` under `scenario`.
    ///
    /// See [`BizScenario::fallback_chain`] for the levels probed.
    pub fn resolve(capability_id: &str, scenario: &BizScenario) -> Vec<ExtensionCoordinate> {
        scenario
            .fallback_chain()
            .into_iter()
            .map(|identity| ExtensionCoordinate::new(capability_id, identity))
            .collect()
    }
}

impl fmt::Display for ExtensionCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.capability_id, self.scenario_identity)
    }
}
