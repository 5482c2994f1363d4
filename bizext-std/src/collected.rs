//! Distributed registration via `inventory`.
//!
//! Implementations can be submitted from anywhere in the program and
//! installed in one step at startup with
//! [`ExtensionRegister::register_collected`]. The `#[extension]` attribute
//! from `bizext-macros` generates these submissions.
//!
//! ```rust,ignore
//! bizext::inventory::submit! {
//!     CollectedExtension::new(
//!         <Say as Capability>::ID,
//!         "SayA",
//!         &["test"],
//!         &["greet"],
//!         &[],
//!         0,
//!         install_default::<Say, SayA>,
//!     )
//! }
//! ```

use crate::register::ExtensionRegister;
use bizext_core::{Capability, Extension, Registration, Result};

/// Installs one collected implementation through a register.
pub type InstallFn = fn(&ExtensionRegister, &Registration) -> Result<()>;

/// A registration submitted to the global collection.
///
/// Empty level lists mean "the default" for that level.
pub struct CollectedExtension {
    capability: &'static str,
    implementation: &'static str,
    biz_ids: &'static [&'static str],
    use_cases: &'static [&'static str],
    scenarios: &'static [&'static str],
    order: i32,
    install: InstallFn,
}

impl CollectedExtension {
    /// Describe a collected registration. Usable in `inventory::submit!`.
    pub const fn new(
        capability: &'static str,
        implementation: &'static str,
        biz_ids: &'static [&'static str],
        use_cases: &'static [&'static str],
        scenarios: &'static [&'static str],
        order: i32,
        install: InstallFn,
    ) -> Self {
        Self {
            capability,
            implementation,
            biz_ids,
            use_cases,
            scenarios,
            order,
            install,
        }
    }

    /// The capability ID.
    pub fn capability(&self) -> &'static str {
        self.capability
    }

    /// The implementing type's name.
    pub fn implementation(&self) -> &'static str {
        self.implementation
    }

    /// Declared order.
    pub fn order(&self) -> i32 {
        self.order
    }

    /// The registration metadata this entry declares.
    pub fn registration(&self) -> Registration {
        Registration::new()
            .with_biz_ids(self.biz_ids.iter().copied())
            .with_use_cases(self.use_cases.iter().copied())
            .with_scenarios(self.scenarios.iter().copied())
            .with_order(self.order)
    }
}

inventory::collect!(CollectedExtension);

/// Install function registering a default-constructed `E` as an extension of `C`.
pub fn install_default<C, E>(register: &ExtensionRegister, registration: &Registration) -> Result<()>
where
    C: Capability,
    E: Extension<C> + Default,
{
    register.register::<C, E>(E::default(), registration)
}

/// Every collected entry, in a deterministic order.
///
/// Link order is unspecified, so entries are sorted by capability, then
/// order, then implementation name.
pub fn collected() -> Vec<&'static CollectedExtension> {
    let mut entries: Vec<&'static CollectedExtension> =
        inventory::iter::<CollectedExtension>.into_iter().collect();
    entries.sort_by(|a, b| {
        (a.capability, a.order, a.implementation).cmp(&(b.capability, b.order, b.implementation))
    });
    entries
}

impl ExtensionRegister {
    /// Install every collected registration.
    ///
    /// Returns the number of installed entries; stops at the first error.
    pub fn register_collected(&self) -> Result<usize> {
        let entries = collected();
        for entry in &entries {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                capability = entry.capability,
                implementation = entry.implementation,
                "Installing collected extension"
            );
            (entry.install)(self, &entry.registration())?;
        }
        Ok(entries.len())
    }
}
