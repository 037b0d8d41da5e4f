//! Inventory addon
//!
//! Logs the managed services once a container has finished wiring.

use hearth_application::ports::{Addon, ContainerContext};
use hearth_application::registry::{REGISTERED_TYPES, TypeEntry};
use hearth_domain::error::Result;
use tracing::{debug, info};

/// Logs every discovered service after wiring
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryAddon;

#[linkme::distributed_slice(REGISTERED_TYPES)]
static INVENTORY_ADDON: TypeEntry = TypeEntry::addon::<InventoryAddon>(
    "hearth::addons::inventory::InventoryAddon",
    "hearth::addons::inventory",
);

impl Addon for InventoryAddon {
    fn name(&self) -> &str {
        "inventory"
    }

    fn post_inject(&self, container: &dyn ContainerContext) -> Result<()> {
        let services = container.discovered_services();
        info!(
            container = container.name(),
            services = services.len(),
            "Service inventory"
        );
        for service in &services {
            debug!(service = service.type_name(), "Managed service");
        }
        Ok(())
    }
}
