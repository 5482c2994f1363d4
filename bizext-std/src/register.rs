//! Writes discovered implementations into the repository.

use crate::repository::{ExtensionRepository, RegisteredExtension};
use bizext_core::{
    BizScenario, Capability, Extension, ExtensionCoordinate, Registration, Result,
};
use std::sync::Arc;

/// Registers implementations under the coordinates their metadata declares.
///
/// The register is driven by a bootstrap step (explicit calls, or
/// [`register_collected`](Self::register_collected) with the `inventory`
/// feature); it never discovers implementations on its own.
///
/// # Example
/// ```ignore
/// let register = ExtensionRegister::new(repository.clone());
/// register.register::<Say, _>(
///     SayA,
///     &Registration::new().with_biz_id("test").with_use_case("greet").with_order(0),
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct ExtensionRegister {
    repository: Arc<ExtensionRepository>,
}

impl ExtensionRegister {
    /// Create a register writing into `repository`.
    pub fn new(repository: Arc<ExtensionRepository>) -> Self {
        Self { repository }
    }

    /// The repository this register writes into.
    pub fn repository(&self) -> &Arc<ExtensionRepository> {
        &self.repository
    }

    /// Register `extension` as an implementation of `C`.
    ///
    /// When `registration` covers several scenarios, the same instance is
    /// stored under each of them.
    ///
    /// # Errors
    ///
    /// Fails with [`DuplicateRegistration`] on the first covered coordinate
    /// that already holds an `E`. Coordinates processed before it keep their
    /// registration.
    ///
    /// [`DuplicateRegistration`]: bizext_core::ExtensionError::DuplicateRegistration
    pub fn register<C, E>(&self, extension: E, registration: &Registration) -> Result<()>
    where
        C: Capability,
        E: Extension<C>,
    {
        self.register_shared::<C, E>(Arc::new(extension), registration)
    }

    /// Register an implementation that is already shared.
    pub fn register_shared<C, E>(&self, extension: Arc<E>, registration: &Registration) -> Result<()>
    where
        C: Capability,
        E: Extension<C>,
    {
        for scenario in registration.scenarios() {
            let coordinate = ExtensionCoordinate::of(C::ID, &scenario);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                coordinate = %coordinate,
                implementation = std::any::type_name::<E>(),
                order = registration.order(),
                "Registering extension"
            );
            let entry = RegisteredExtension::from_shared::<C, E>(
                Arc::clone(&extension),
                registration.order(),
            );
            self.repository.put(coordinate, entry)?;
        }
        Ok(())
    }

    /// Register `extension` under a single scenario.
    pub fn register_at<C, E>(&self, extension: E, scenario: &BizScenario, order: i32) -> Result<()>
    where
        C: Capability,
        E: Extension<C>,
    {
        self.register::<C, E>(
            extension,
            &Registration::for_scenario(scenario).with_order(order),
        )
    }
}
