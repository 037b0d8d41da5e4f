//! Configuration slot port

use crate::error::CoercionError;
use crate::value_objects::ConfigValue;

/// A field of a service that receives a configuration value
///
/// The container reads [`ConfigSlot::key`] from the store and hands the value
/// to [`ConfigSlot::assign`]. When the key is absent the slot is left alone,
/// so its current value acts as the default.
pub trait ConfigSlot: Send + Sync {
    /// Configuration key this slot is bound to
    fn key(&self) -> &str;

    /// Declared type of the slot, used in error messages
    fn type_name(&self) -> &'static str;

    /// Constant slots must never be exposed for injection
    fn is_constant(&self) -> bool {
        false
    }

    /// Coerce `value` into the slot type and store it
    fn assign(&self, value: &ConfigValue) -> Result<(), CoercionError>;
}
