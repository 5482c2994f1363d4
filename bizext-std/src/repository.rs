//! Concurrent store of registered extensions.
//!
//! The repository maps each [`ExtensionCoordinate`] to an ordered,
//! immutable snapshot of its registrations. Writers replace the snapshot
//! under a write lock; readers clone the `Arc` under a read lock and never
//! see a partially appended or partially sorted list.

use bizext_core::{Capability, Extension, ExtensionCoordinate, ExtensionError, Result};
use parking_lot::RwLock;
use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
    sync::Arc,
};

/// One implementation registered under one coordinate.
///
/// The instance is type-erased; [`downcast`](Self::downcast) recovers it as
/// `Arc<dyn Extension<C>>` for the capability it was registered for.
#[derive(Clone)]
pub struct RegisteredExtension {
    instance: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
    order: i32,
}

impl RegisteredExtension {
    /// Wrap an owned implementation.
    pub fn new<C, E>(extension: E, order: i32) -> Self
    where
        C: Capability,
        E: Extension<C>,
    {
        Self::from_shared::<C, E>(Arc::new(extension), order)
    }

    /// Wrap an implementation that may also be registered elsewhere.
    pub fn from_shared<C, E>(extension: Arc<E>, order: i32) -> Self
    where
        C: Capability,
        E: Extension<C>,
    {
        let erased: Arc<dyn Extension<C>> = extension;
        Self {
            instance: Arc::new(erased),
            type_id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
            order,
        }
    }

    /// The implementation as an extension of `C`, if it was registered for `C`.
    pub fn downcast<C: Capability>(&self) -> Option<&Arc<dyn Extension<C>>> {
        self.instance.downcast_ref::<Arc<dyn Extension<C>>>()
    }

    /// Identity of the concrete implementation type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the concrete implementation type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Position in the coordinate's list. Lower runs first.
    pub fn order(&self) -> i32 {
        self.order
    }
}

impl fmt::Debug for RegisteredExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredExtension")
            .field("type_name", &self.type_name)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// An immutable, ordered list of registrations for one coordinate.
pub type ExtensionList = Arc<[RegisteredExtension]>;

/// Process-wide store of extensions, shared by the register and executor.
///
/// # Example
/// ```ignore
/// let repository = Arc::new(ExtensionRepository::new());
/// let register = ExtensionRegister::new(repository.clone());
/// let executor = ExtensionExecutor::new(repository);
/// ```
#[derive(Default)]
pub struct ExtensionRepository {
    entries: RwLock<HashMap<ExtensionCoordinate, ExtensionList>>,
}

impl ExtensionRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entry` under `coordinate`.
    ///
    /// The list is re-sorted by order after the append; entries with equal
    /// order keep their registration order.
    ///
    /// # Errors
    ///
    /// [`ExtensionError::DuplicateRegistration`] if an entry of the same
    /// concrete type is already stored under `coordinate`.
    pub fn put(&self, coordinate: ExtensionCoordinate, entry: RegisteredExtension) -> Result<()> {
        let mut entries = self.entries.write();

        let mut next: Vec<RegisteredExtension> = match entries.get(&coordinate) {
            Some(current) => {
                if current.iter().any(|e| e.type_id == entry.type_id) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        coordinate = %coordinate,
                        implementation = entry.type_name,
                        "Rejected duplicate extension registration"
                    );
                    return Err(ExtensionError::DuplicateRegistration {
                        coordinate,
                        implementation: entry.type_name,
                    });
                }
                let mut next = Vec::with_capacity(current.len() + 1);
                next.extend(current.iter().cloned());
                next.push(entry);
                next
            }
            None => vec![entry],
        };

        // `sort_by_key` is stable: equal orders keep insertion order.
        next.sort_by_key(RegisteredExtension::order);
        entries.insert(coordinate, next.into());
        Ok(())
    }

    /// The ordered registrations stored under `coordinate`.
    ///
    /// # Errors
    ///
    /// [`ExtensionError::CapabilityNotFound`] if nothing is stored there.
    pub fn get(&self, coordinate: &ExtensionCoordinate) -> Result<ExtensionList> {
        self.find(coordinate)
            .ok_or_else(|| ExtensionError::CapabilityNotFound {
                capability: coordinate.capability_id().to_string(),
                scenario: coordinate.scenario_identity().to_string(),
            })
    }

    /// Like [`get`](Self::get), without the error.
    pub fn find(&self, coordinate: &ExtensionCoordinate) -> Option<ExtensionList> {
        self.entries.read().get(coordinate).cloned()
    }

    /// Whether any registration exists under `coordinate`.
    pub fn contains(&self, coordinate: &ExtensionCoordinate) -> bool {
        self.entries.read().contains_key(coordinate)
    }

    /// Number of occupied coordinates.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Total number of registrations across all coordinates.
    pub fn extension_count(&self) -> usize {
        self.entries.read().values().map(|list| list.len()).sum()
    }

    /// All occupied coordinates, sorted.
    pub fn coordinates(&self) -> Vec<ExtensionCoordinate> {
        let mut coordinates: Vec<ExtensionCoordinate> =
            self.entries.read().keys().cloned().collect();
        coordinates.sort();
        coordinates
    }
}

impl fmt::Debug for ExtensionRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRepository")
            .field("coordinates", &self.len())
            .field("extensions", &self.extension_count())
            .finish()
    }
}
