//! Configuration binder
//!
//! Walks the configuration slots a service exposes and assigns each one the
//! value stored under its key.

use hearth_domain::error::{CoercionError, Error, Result};
use hearth_domain::ports::{Service, ServiceLookup};
use hearth_domain::value_objects::ConfigurationStore;
use tracing::trace;

/// Assign configuration values to every slot of a service
///
/// Slots whose key is absent (or null) keep their current value. Returns the
/// number of slots that were assigned.
///
/// # Errors
///
/// - [`Error::ImmutableField`] when the service exposes a constant slot
/// - [`Error::UnsupportedFieldType`] when the value kind has no conversion
/// - [`Error::InvalidFieldValue`] when the conversion exists but fails
pub fn inject_config(
    service_name: &str,
    service: &dyn Service,
    store: &ConfigurationStore,
) -> Result<usize> {
    let mut assigned = 0;

    for slot in service.config_slots() {
        if slot.is_constant() {
            return Err(Error::ImmutableField {
                service: service_name.to_string(),
                field: slot.key().to_string(),
            });
        }

        let Some(value) = store.get(slot.key()).filter(|value| !value.is_null()) else {
            continue;
        };

        slot.assign(value).map_err(|source| match source {
            CoercionError::Constant => Error::ImmutableField {
                service: service_name.to_string(),
                field: slot.key().to_string(),
            },
            CoercionError::Mismatch { .. } => Error::UnsupportedFieldType {
                service: service_name.to_string(),
                field: slot.key().to_string(),
                type_name: slot.type_name(),
                source,
            },
            other => Error::InvalidFieldValue {
                service: service_name.to_string(),
                field: slot.key().to_string(),
                type_name: slot.type_name(),
                source: other,
            },
        })?;

        trace!(service = service_name, key = slot.key(), "Injected configuration value");
        assigned += 1;
    }

    Ok(assigned)
}

/// Resolve dependencies, then assign configuration when a store is given
///
/// # Errors
///
/// Propagates failures from [`Service::inject`] and [`inject_config`].
pub fn inject_service(
    service_name: &str,
    service: &dyn Service,
    lookup: &dyn ServiceLookup,
    store: Option<&ConfigurationStore>,
) -> Result<()> {
    service.inject(lookup)?;
    if let Some(store) = store {
        inject_config(service_name, service, store)?;
    }
    Ok(())
}
