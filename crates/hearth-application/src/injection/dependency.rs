//! Service dependencies
//!
//! A service holds its collaborators in [`Inject`] fields and resolves them
//! from [`Service::inject`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use hearth_domain::error::{Error, Result};
use hearth_domain::ports::{Service, ServiceLookup};

/// Lazily resolved reference to another service
pub struct Inject<T> {
    cell: OnceLock<Arc<T>>,
}

impl<T: Service> Inject<T> {
    /// Unresolved holder
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Resolve the dependency, keeping the first successful resolution
    ///
    /// # Errors
    ///
    /// [`Error::Injection`] when no `T` is registered in the scope.
    pub fn resolve(&self, lookup: &dyn ServiceLookup) -> Result<Arc<T>> {
        if let Some(existing) = self.cell.get() {
            return Ok(Arc::clone(existing));
        }
        let resolved = lookup.resolve::<T>().ok_or_else(|| {
            Error::injection(
                std::any::type_name::<T>(),
                "dependency is not registered in the service scope",
            )
        })?;
        Ok(Arc::clone(self.cell.get_or_init(|| resolved)))
    }

    /// Resolve the dependency if it is registered
    pub fn resolve_optional(&self, lookup: &dyn ServiceLookup) -> Option<Arc<T>> {
        self.resolve(lookup).ok()
    }

    /// Resolved instance
    pub fn get(&self) -> Option<&Arc<T>> {
        self.cell.get()
    }

    /// Whether the dependency has been resolved
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: Service> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("type", &std::any::type_name::<T>())
            .field("resolved", &self.cell.get().is_some())
            .finish()
    }
}
