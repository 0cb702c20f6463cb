//! Service container module for dependency injection.
//!
//! This module contains the ServiceContainer type, the built form of a
//! [`ServiceCollection`](crate::ServiceCollection), and the context handed
//! to factories.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Instant;

use crate::controller::Controller;
use crate::descriptors::{describe, ServiceDescriptor};
use crate::error::{DiError, DiResult};
use crate::internal::{with_resolution_guard, RwLock};
use crate::lifetime::Lifetime;
use crate::observer::Observers;
use crate::registration::{AnyArc, Registration, Registry};
use crate::traits::Container;

mod context;
pub use context::ResolverContext;

/// String-keyed dependency injection container.
///
/// The container is shared behind an `Arc` for the lifetime of the
/// application and is safe for concurrent resolution. Registrations are
/// fixed at build time; [`set`](Self::set) and
/// [`set_controller`](Self::set_controller) place runtime overrides on top
/// of them, which is how tests and bootstrapping code swap in prepared
/// instances.
///
/// # Examples
///
/// ```
/// use ferrous_controller::{Container, ContainerExt, ServiceCollection};
/// use std::sync::Arc;
///
/// let container = ServiceCollection::new().build();
/// assert!(!container.has("app.clock"));
///
/// container.set("app.clock", 1_700_000_000u64);
/// assert!(container.has("app.clock"));
/// assert!(container.initialized("app.clock"));
/// assert_eq!(*container.get::<u64>("app.clock").unwrap(), 1_700_000_000);
/// ```
pub struct ServiceContainer {
    registry: Registry,
    overrides: RwLock<HashMap<String, AnyArc>>,
    observers: Observers,
    self_ref: Weak<ServiceContainer>,
}

impl ServiceContainer {
    pub(crate) fn new(registry: Registry, observers: Observers) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            registry,
            overrides: RwLock::new(HashMap::new()),
            observers,
            self_ref: weak.clone(),
        })
    }

    /// Creates an empty container.
    pub fn empty() -> Arc<Self> {
        Self::new(Registry::new(), Observers::new())
    }

    /// Shared handle to this container as a trait object.
    pub fn handle(&self) -> Option<Arc<dyn Container>> {
        self.self_ref
            .upgrade()
            .map(|container| container as Arc<dyn Container>)
    }

    /// Sets (or replaces) the service stored under `id`.
    pub fn set<T: Send + Sync + 'static>(&self, id: impl Into<String>, value: T) {
        self.set_any(id, Arc::new(value));
    }

    /// Sets (or replaces) the controller stored under `id`.
    ///
    /// The same `Arc` is handed out on every resolution of `id`.
    pub fn set_controller(&self, id: impl Into<String>, controller: Arc<dyn Controller>) {
        self.set_any(id, Arc::new(controller));
    }

    fn set_any(&self, id: impl Into<String>, value: AnyArc) {
        let id = id.into();
        tracing::trace!(target: "ferrous_controller::container", service = %id, "service overridden");
        self.overrides.write().insert(id, value);
    }

    /// Whether a shared instance exists for `id` (set at runtime, registered
    /// as an instance, or a singleton that was already resolved).
    pub fn initialized(&self, id: &str) -> bool {
        if self.lookup_override(id).is_some() {
            return true;
        }
        self.registry
            .get(id)
            .map(Registration::is_initialized)
            .unwrap_or(false)
    }

    /// Descriptors of the build-time registrations, sorted by id.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        describe(&self.registry)
    }

    fn lookup_override(&self, id: &str) -> Option<AnyArc> {
        let overrides = self.overrides.read();
        overrides
            .get(id)
            .or_else(|| overrides.get(self.registry.canonical(id)))
            .cloned()
    }

    fn build_registered(&self, id: &str, reg: &Registration) -> DiResult<AnyArc> {
        match reg.lifetime {
            Lifetime::Singleton => self.resolve_singleton(id, reg),
            Lifetime::Transient => {
                with_resolution_guard(id, || (reg.ctor)(&ResolverContext::new(self)))
            }
        }
    }

    fn resolve_singleton(&self, id: &str, reg: &Registration) -> DiResult<AnyArc> {
        let Some(cell) = &reg.single_runtime else {
            return with_resolution_guard(id, || (reg.ctor)(&ResolverContext::new(self)));
        };

        if let Some(value) = cell.lock().as_ref() {
            return Ok(value.clone());
        }

        // The lock is not held while the factory runs so it can resolve
        // other services; a racing thread may build a second value, first
        // one stored wins.
        let value = with_resolution_guard(id, || (reg.ctor)(&ResolverContext::new(self)))?;
        let mut slot = cell.lock();
        Ok(slot.get_or_insert(value).clone())
    }
}

impl Container for ServiceContainer {
    fn has(&self, id: &str) -> bool {
        let overrides = self.overrides.read();
        overrides.contains_key(id)
            || overrides.contains_key(self.registry.canonical(id))
            || self.registry.contains(id)
    }

    fn resolve_any(&self, id: &str) -> DiResult<AnyArc> {
        let observed = self.observers.has_observers();
        let start = Instant::now();
        if observed {
            self.observers.resolving(id);
        }

        let result = match self.lookup_override(id) {
            Some(value) => Ok(value),
            None => {
                let canonical = self.registry.canonical(id);
                match self.registry.services.get(canonical) {
                    Some(reg) => self.build_registered(canonical, reg),
                    None if self.registry.removed.contains(canonical) => {
                        Err(DiError::Removed(id.to_string()))
                    }
                    None => {
                        if observed {
                            self.observers.not_found(id);
                        }
                        return Err(DiError::NotFound(id.to_string()));
                    }
                }
            }
        };

        if observed {
            match &result {
                Ok(_) => self.observers.resolved(id, start.elapsed()),
                Err(err) => self.observers.failed(id, err),
            }
        }
        result
    }

    fn is_removed(&self, id: &str) -> bool {
        !self.has(id) && self.registry.removed.contains(self.registry.canonical(id))
    }

    fn service_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .registry
            .services
            .keys()
            .chain(self.registry.aliases.keys())
            .cloned()
            .chain(self.overrides.read().keys().cloned())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
