//! Service initialization and teardown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use hearth_application::injection::inject_service;
use hearth_domain::error::{Error, Result};
use hearth_domain::ports::ServiceInstance;
use hearth_domain::value_objects::{LifecyclePhase, LifecycleState, TeardownOrder};
use tracing::{debug, error, info};

use super::Container;

/// A discovered service and how far its lifecycle has progressed
#[derive(Debug, Clone)]
pub struct ManagedService {
    /// Fully-qualified type name the service was discovered under
    pub name: String,
    /// The service instance
    pub instance: ServiceInstance,
    /// Current lifecycle state
    pub state: LifecycleState,
}

impl ManagedService {
    /// Track a freshly discovered instance
    pub fn new(name: impl Into<String>, instance: ServiceInstance) -> Self {
        Self {
            name: name.into(),
            instance,
            state: LifecycleState::Discovered,
        }
    }
}

/// Await a lifecycle hook, bounded by the optional timeout
async fn run_hook<F>(
    service: &str,
    phase: LifecyclePhase,
    timeout: Option<Duration>,
    hook: F,
) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let outcome = match timeout {
        Some(limit) => tokio::time::timeout(limit, hook)
            .await
            .map_err(|_| Error::LifecycleTimeout {
                service: service.to_string(),
                phase,
                timeout: limit,
            })?,
        None => hook.await,
    };
    outcome.map_err(|source| Error::lifecycle(service, phase, source))
}

impl Container {
    /// Inject, post-construct and start every service in discovery order
    ///
    /// Stops at the first failure; services after it stay `Discovered`.
    pub(super) async fn init_services(&mut self) -> Result<()> {
        let configuration = self.configuration();
        let scope = Arc::clone(&self.scope);
        let timeout = self.settings.lifecycle_timeout();

        for index in 0..self.services.len() {
            let name = self.services[index].name.clone();
            let instance = self.services[index].instance.clone();
            let service = instance.service();

            inject_service(&name, service.as_ref(), scope.as_ref(), Some(&configuration))?;
            self.services[index].state = LifecycleState::Injected;

            run_hook(&name, LifecyclePhase::PostConstruct, timeout, scope.post_construct(&instance)).await?;
            self.services[index].state = LifecycleState::PostConstructed;

            if let Some(startable) = service.as_startable() {
                run_hook(&name, LifecyclePhase::Start, timeout, startable.start()).await?;
                self.services[index].state = LifecycleState::Started;
                info!(service = %name, "Service started");
            } else {
                debug!(service = %name, "Service initialized");
            }
        }

        Ok(())
    }

    /// Pre-destroy then stop every initialized service
    ///
    /// Every service is attempted; failures are collected into [`Error::Teardown`].
    pub(super) async fn destroy_services(&mut self) -> Result<()> {
        let scope = Arc::clone(&self.scope);
        let timeout = self.settings.lifecycle_timeout();

        let order: Vec<usize> = match self.settings.teardown_order {
            TeardownOrder::Reverse => (0..self.services.len()).rev().collect(),
            TeardownOrder::Discovery => (0..self.services.len()).collect(),
        };

        let mut failures = Vec::new();
        for index in order {
            let state = self.services[index].state;
            if !state.needs_teardown() {
                continue;
            }
            let name = self.services[index].name.clone();
            let instance = self.services[index].instance.clone();

            if let Err(e) =
                run_hook(&name, LifecyclePhase::PreDestroy, timeout, scope.pre_destroy(&instance)).await
            {
                error!(service = %name, error = %e, "Pre-destroy failed");
                failures.push(e);
            }
            self.services[index].state = LifecycleState::PreDestroyed;

            if state == LifecycleState::Started {
                if let Some(startable) = instance.service().as_startable() {
                    if let Err(e) = run_hook(&name, LifecyclePhase::Stop, timeout, startable.stop()).await {
                        error!(service = %name, error = %e, "Stop failed");
                        failures.push(e);
                    }
                }
            }
            self.services[index].state = LifecycleState::Stopped;
            debug!(service = %name, "Service torn down");
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Teardown { failures })
        }
    }
}
