//! Type descriptors
//!
//! A [`TypeEntry`] is the registration-table stand-in for a loadable type:
//! its fully-qualified name, the package it lives in, whether it is marked as
//! a singleton service, the nested types it groups, and how to construct it.

use std::any::TypeId;
use std::fmt;

use hearth_domain::constants::PACKAGE_SEPARATOR;
use hearth_domain::error::Result;
use hearth_domain::ports::{Service, ServiceInstance};

use crate::ports::Addon;

/// No-argument factory producing a service instance
pub type ServiceFactory = fn() -> Result<ServiceInstance>;

/// No-argument factory producing an addon
pub type AddonFactory = fn() -> Result<Box<dyn Addon>>;

/// Marker a type carries
///
/// Both service markers are treated identically by the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeMarker {
    /// Generic injectable singleton marker
    Singleton,
    /// Named service marker
    NamedService,
    /// Not a service; may group nested types
    Unmarked,
}

/// How a type is instantiated
#[derive(Clone, Copy)]
pub enum Constructor {
    /// Service with a no-argument factory
    Service {
        /// Builds a new instance
        factory: ServiceFactory,
        /// Concrete type the factory produces
        type_id: fn() -> TypeId,
    },
    /// Addon with a no-argument factory
    Addon(AddonFactory),
    /// No constructor: abstract markers and grouping types
    Abstract,
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service { .. } => f.write_str("Service"),
            Self::Addon(_) => f.write_str("Addon"),
            Self::Abstract => f.write_str("Abstract"),
        }
    }
}

/// Registration-table descriptor of one type
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
    /// Fully-qualified name, e.g. `app::greeting::Greeter`
    pub name: &'static str,
    /// Package the type belongs to, e.g. `app::greeting`
    pub package: &'static str,
    /// Service marker
    pub marker: TypeMarker,
    /// Fully-qualified names of nested types
    pub nested: &'static [&'static str],
    /// Construction strategy
    pub constructor: Constructor,
}

fn default_service<T: Service + Default>() -> Result<ServiceInstance> {
    Ok(ServiceInstance::new(T::default()))
}

fn default_addon<A: Addon + Default + 'static>() -> Result<Box<dyn Addon>> {
    Ok(Box::new(A::default()))
}

impl TypeEntry {
    /// Singleton service built with `T::default()`
    pub const fn singleton<T: Service + Default>(name: &'static str, package: &'static str) -> Self {
        Self::service_from::<T>(name, package, TypeMarker::Singleton, default_service::<T>)
    }

    /// Named service built with `T::default()`
    pub const fn named_service<T: Service + Default>(
        name: &'static str,
        package: &'static str,
    ) -> Self {
        Self::service_from::<T>(name, package, TypeMarker::NamedService, default_service::<T>)
    }

    /// Service built by a custom no-argument factory
    pub const fn service_from<T: Service>(
        name: &'static str,
        package: &'static str,
        marker: TypeMarker,
        factory: ServiceFactory,
    ) -> Self {
        Self {
            name,
            package,
            marker,
            nested: &[],
            constructor: Constructor::Service {
                factory,
                type_id: TypeId::of::<T>,
            },
        }
    }

    /// Addon built with `A::default()`
    pub const fn addon<A: Addon + Default + 'static>(
        name: &'static str,
        package: &'static str,
    ) -> Self {
        Self::addon_from(name, package, default_addon::<A>)
    }

    /// Addon built by a custom no-argument factory
    pub const fn addon_from(name: &'static str, package: &'static str, factory: AddonFactory) -> Self {
        Self {
            name,
            package,
            marker: TypeMarker::Unmarked,
            nested: &[],
            constructor: Constructor::Addon(factory),
        }
    }

    /// Unmarked type without a constructor (grouping type or abstract marker)
    pub const fn abstract_type(name: &'static str, package: &'static str) -> Self {
        Self {
            name,
            package,
            marker: TypeMarker::Unmarked,
            nested: &[],
            constructor: Constructor::Abstract,
        }
    }

    /// Declare nested types
    #[must_use]
    pub const fn with_nested(mut self, nested: &'static [&'static str]) -> Self {
        self.nested = nested;
        self
    }

    /// Whether the type carries either service marker
    pub fn is_service(&self) -> bool {
        matches!(self.marker, TypeMarker::Singleton | TypeMarker::NamedService)
    }

    /// Whether the type can be instantiated as an addon
    pub fn is_addon(&self) -> bool {
        matches!(self.constructor, Constructor::Addon(_))
    }

    /// Whether the type lives in `package` or one of its sub-packages
    pub fn belongs_to(&self, package: &str) -> bool {
        match self.package.strip_prefix(package) {
            Some(rest) => rest.is_empty() || rest.starts_with(PACKAGE_SEPARATOR),
            None => false,
        }
    }

    /// Concrete type produced by the service factory
    pub fn service_type_id(&self) -> Option<TypeId> {
        match self.constructor {
            Constructor::Service { type_id, .. } => Some(type_id()),
            _ => None,
        }
    }
}

/// `TypeEntry` for a singleton named after its module path
///
/// ```ignore
/// #[linkme::distributed_slice(REGISTERED_TYPES)]
/// static GREETER: TypeEntry = hearth_application::singleton!(Greeter);
/// ```
#[macro_export]
macro_rules! singleton {
    ($ty:ident) => {
        $crate::registry::TypeEntry::singleton::<$ty>(
            concat!(module_path!(), "::", stringify!($ty)),
            module_path!(),
        )
    };
}

/// `TypeEntry` for a named service named after its module path
#[macro_export]
macro_rules! named_service {
    ($ty:ident) => {
        $crate::registry::TypeEntry::named_service::<$ty>(
            concat!(module_path!(), "::", stringify!($ty)),
            module_path!(),
        )
    };
}
