//! Configuration slots
//!
//! [`Setting`] is the injectable field type; its construction value is the
//! default kept when the store has no entry for the key. [`Constant`] marks a
//! fixed value and is rejected if a service exposes it for injection.

use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use hearth_domain::error::CoercionError;
use hearth_domain::ports::ConfigSlot;
use hearth_domain::value_objects::ConfigValue;

use super::coerce::FromConfigValue;

/// Mutable configuration field bound to a key
pub struct Setting<T> {
    key: String,
    value: RwLock<T>,
}

impl<T> Setting<T> {
    /// Bind `key` with a default value
    pub fn new(key: impl Into<String>, default: T) -> Self {
        Self {
            key: key.into(),
            value: RwLock::new(default),
        }
    }

    /// Bound key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the current value
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.value.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the current value
    pub fn set(&self, value: T) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl<T: Clone> Setting<T> {
    /// Copy of the current value
    pub fn get(&self) -> T {
        self.read().clone()
    }
}

impl<T: FromConfigValue + Send + Sync> ConfigSlot for Setting<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn assign(&self, value: &ConfigValue) -> Result<(), CoercionError> {
        let coerced = T::from_config_value(value)?;
        self.set(coerced);
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("key", &self.key)
            .field("value", &*self.read())
            .finish()
    }
}

/// Fixed value that must never be injected
#[derive(Debug, Clone)]
pub struct Constant<T> {
    key: String,
    value: T,
}

impl<T> Constant<T> {
    /// Bind `key` to a fixed value
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// The fixed value
    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: Send + Sync> ConfigSlot for Constant<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn is_constant(&self) -> bool {
        true
    }

    fn assign(&self, _value: &ConfigValue) -> Result<(), CoercionError> {
        Err(CoercionError::Constant)
    }
}
