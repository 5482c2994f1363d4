//! # Business Scenario Key
//!
//! A [`BizScenario`] selects among competing implementations of a capability.
//! It is a fixed three-level key:
//!
//! - **biz id**: the business line or tenant (`"tmall"`, `"retail"`)
//! - **use case**: the operation within that business (`"placeOrder"`)
//! - **scenario**: the variant of that operation (`"presale"`)
//!
//! Each level falls back to a well-known sentinel when unspecified. The
//! sentinels are what make the fallback chain in [`BizScenario::fallback_chain`]
//! work: a registration made only with a biz id is stored under
//! `biz.#defaultUseCase#.#defaultScenario#` and is found by any lookup for
//! that biz id whose more specific coordinates are empty.
//!
//! Any string is a valid level. Inside an identity, a `.` or `\` occurring in
//! a level is escaped with `\`, so distinct keys never share an identity.

use crate::error::ExtensionError;
use std::{
    fmt,
    hash::{Hash, Hasher},
    mem,
    str::FromStr,
};

/// Sentinel biz id used when none is given.
pub const DEFAULT_BIZ_ID: &str = "#defaultBizId#";
/// Sentinel use case used when none is given.
pub const DEFAULT_USE_CASE: &str = "#defaultUseCase#";
/// Sentinel scenario used when none is given.
pub const DEFAULT_SCENARIO: &str = "#defaultScenario#";

/// Separator between the three parts of a unique identity.
pub const IDENTITY_SEPARATOR: char = '.';

/// Escapes a separator or itself inside an identity level.
const IDENTITY_ESCAPE: char = '\\';

/// An immutable three-part business scenario key.
///
/// Equality and hashing are defined over [`unique_identity`](Self::unique_identity)
/// only.
///
/// # Example
///
/// ```rust
/// use bizext_core::BizScenario;
///
/// let scenario = BizScenario::new("tmall", "placeOrder", "presale");
/// assert_eq!(scenario.unique_identity(), "tmall.placeOrder.presale");
///
/// let biz_only = BizScenario::of_biz("tmall");
/// assert_eq!(
///     biz_only.unique_identity(),
///     "tmall.#defaultUseCase#.#defaultScenario#"
/// );
/// ```
#[derive(Clone)]
pub struct BizScenario {
    biz_id: String,
    use_case: String,
    scenario: String,
    identity: String,
}

impl BizScenario {
    /// Create a scenario from all three parts.
    pub fn new(
        biz_id: impl Into<String>,
        use_case: impl Into<String>,
        scenario: impl Into<String>,
    ) -> Self {
        let biz_id = biz_id.into();
        let use_case = use_case.into();
        let scenario = scenario.into();
        let identity = join_identity(&biz_id, &use_case, &scenario);
        Self {
            biz_id,
            use_case,
            scenario,
            identity,
        }
    }

    /// Scenario for a biz id with default use case and scenario.
    pub fn of_biz(biz_id: impl Into<String>) -> Self {
        Self::new(biz_id, DEFAULT_USE_CASE, DEFAULT_SCENARIO)
    }

    /// Scenario for a biz id and use case with the default scenario.
    pub fn of_use_case(biz_id: impl Into<String>, use_case: impl Into<String>) -> Self {
        Self::new(biz_id, use_case, DEFAULT_SCENARIO)
    }

    /// The all-defaults scenario, the last step of every fallback chain.
    pub fn default_scenario() -> Self {
        Self::new(DEFAULT_BIZ_ID, DEFAULT_USE_CASE, DEFAULT_SCENARIO)
    }

    /// The biz id level.
    pub fn biz_id(&self) -> &str {
        &self.biz_id
    }

    /// The use case level.
    pub fn use_case(&self) -> &str {
        &self.use_case
    }

    /// The scenario level.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// The canonical `bizId.useCase.scenario` string.
    ///
    /// Separators and escapes inside a level are prefixed with `\`.
    pub fn unique_identity(&self) -> &str {
        &self.identity
    }

    /// Identity with the scenario level replaced by [`DEFAULT_SCENARIO`].
    pub fn identity_with_default_scenario(&self) -> String {
        join_identity(&self.biz_id, &self.use_case, DEFAULT_SCENARIO)
    }

    /// Identity with both use case and scenario replaced by their defaults.
    pub fn identity_with_default_use_case(&self) -> String {
        join_identity(&self.biz_id, DEFAULT_USE_CASE, DEFAULT_SCENARIO)
    }

    /// Whether every level is the sentinel default.
    pub fn is_default(&self) -> bool {
        self.biz_id == DEFAULT_BIZ_ID
            && self.use_case == DEFAULT_USE_CASE
            && self.scenario == DEFAULT_SCENARIO
    }

    /// Identities to probe for a lookup, most specific first.
    ///
    /// 1. `biz.useCase.scenario`
    /// 2. `biz.useCase.#defaultScenario#`
    /// 3. `biz.#defaultUseCase#.#defaultScenario#`
    /// 4. `#defaultBizId#.#defaultUseCase#.#defaultScenario#`
    ///
    /// Steps that produce the same identity as the previous one are collapsed,
    /// so a scenario that already uses defaults is probed only once per level.
    pub fn fallback_chain(&self) -> Vec<String> {
        let candidates = [
            self.identity.clone(),
            self.identity_with_default_scenario(),
            self.identity_with_default_use_case(),
            join_identity(DEFAULT_BIZ_ID, DEFAULT_USE_CASE, DEFAULT_SCENARIO),
        ];

        let mut chain: Vec<String> = Vec::with_capacity(candidates.len());
        for identity in candidates {
            if chain.last() != Some(&identity) {
                chain.push(identity);
            }
        }
        chain
    }
}

fn join_identity(biz_id: &str, use_case: &str, scenario: &str) -> String {
    let mut identity =
        String::with_capacity(biz_id.len() + use_case.len() + scenario.len() + 2);
    push_level(&mut identity, biz_id);
    identity.push(IDENTITY_SEPARATOR);
    push_level(&mut identity, use_case);
    identity.push(IDENTITY_SEPARATOR);
    push_level(&mut identity, scenario);
    identity
}

fn push_level(identity: &mut String, level: &str) {
    for ch in level.chars() {
        if ch == IDENTITY_SEPARATOR || ch == IDENTITY_ESCAPE {
            identity.push(IDENTITY_ESCAPE);
        }
        identity.push(ch);
    }
}

impl Default for BizScenario {
    fn default() -> Self {
        Self::default_scenario()
    }
}

impl PartialEq for BizScenario {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for BizScenario {}

impl Hash for BizScenario {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Debug for BizScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BizScenario").field(&self.identity).finish()
    }
}

impl fmt::Display for BizScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity)
    }
}

/// Parses a `bizId.useCase.scenario` identity, the inverse of
/// [`unique_identity`](BizScenario::unique_identity).
///
/// Exactly three levels separated by unescaped `.` are required; `\` may
/// only precede `.` or `\`.
impl FromStr for BizScenario {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ExtensionError::InvalidIdentity(s.to_string());

        let mut levels: Vec<String> = Vec::with_capacity(3);
        let mut current = String::new();
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            match ch {
                IDENTITY_ESCAPE => match chars.next() {
                    Some(escaped @ (IDENTITY_SEPARATOR | IDENTITY_ESCAPE)) => {
                        current.push(escaped)
                    }
                    _ => return Err(invalid()),
                },
                IDENTITY_SEPARATOR => levels.push(mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
        levels.push(current);

        let [biz_id, use_case, scenario]: [String; 3] =
            levels.try_into().map_err(|_| invalid())?;
        Ok(Self::new(biz_id, use_case, scenario))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_concatenates_in_order() {
        let scenario = BizScenario::new("x", "y", "z");
        assert_eq!(scenario.unique_identity(), "x.y.z");
        assert_eq!(scenario.to_string(), "x.y.z");
    }

    #[test]
    fn test_defaults_fill_missing_levels() {
        let scenario = BizScenario::of_use_case("x", "y");
        assert_eq!(scenario.scenario(), DEFAULT_SCENARIO);
        assert!(BizScenario::default().is_default());
        assert!(!scenario.is_default());
    }

    #[test]
    fn test_equality_follows_identity() {
        let a = BizScenario::new("x", "y", "z");
        let b = BizScenario::new(String::from("x"), "y", "z");
        let c = BizScenario::new("x", "y", "w");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_fallback_chain_order() {
        let chain = BizScenario::new("x", "y", "z").fallback_chain();
        assert_eq!(
            chain,
            vec![
                "x.y.z".to_string(),
                format!("x.y.{DEFAULT_SCENARIO}"),
                format!("x.{DEFAULT_USE_CASE}.{DEFAULT_SCENARIO}"),
                format!("{DEFAULT_BIZ_ID}.{DEFAULT_USE_CASE}.{DEFAULT_SCENARIO}"),
            ]
        );
    }

    #[test]
    fn test_fallback_chain_collapses_repeated_levels() {
        assert_eq!(BizScenario::of_biz("x").fallback_chain().len(), 2);
        assert_eq!(BizScenario::default().fallback_chain().len(), 1);
    }

    #[test]
    fn test_parse_identity() {
        let parsed: BizScenario = "x.y.z".parse().unwrap();
        assert_eq!(parsed, BizScenario::new("x", "y", "z"));
        assert_eq!(parsed.use_case(), "y");

        assert!(matches!(
            "x.y".parse::<BizScenario>(),
            Err(ExtensionError::InvalidIdentity(_))
        ));
        assert!("x.y.z.w".parse::<BizScenario>().is_err());
        assert!("x.y.z\\".parse::<BizScenario>().is_err());
        assert!("x.y\\z.w".parse::<BizScenario>().is_err());
    }

    #[test]
    fn test_dotted_levels_keep_distinct_identities() {
        let a = BizScenario::new("a.b", "c", "d");
        let b = BizScenario::new("a", "b.c", "d");
        assert_ne!(a, b);
        assert_eq!(a.unique_identity(), "a\\.b.c.d");
        assert_eq!(b.unique_identity(), "a.b\\.c.d");
        assert_ne!(
            a.identity_with_default_scenario(),
            b.identity_with_default_scenario()
        );
    }

    #[test]
    fn test_identity_round_trips_through_parse() {
        for scenario in [
            BizScenario::new("a.b", "c", "d"),
            BizScenario::new("shop", "eu.pay", "x\\y"),
            BizScenario::new("", "b", ""),
            BizScenario::default(),
        ] {
            let parsed: BizScenario = scenario.to_string().parse().unwrap();
            assert_eq!(parsed, scenario);
            assert_eq!(parsed.biz_id(), scenario.biz_id());
            assert_eq!(parsed.use_case(), scenario.use_case());
            assert_eq!(parsed.scenario(), scenario.scenario());
        }
    }
}
