//! Service collection module for dependency injection.
//!
//! This module contains the ServiceCollection type used to register services
//! and controllers before building a [`ServiceContainer`].

use std::sync::Arc;

use crate::container::{ResolverContext, ServiceContainer};
use crate::controller::Controller;
use crate::descriptors::{describe, ServiceDescriptor};
use crate::error::DiResult;
use crate::lifetime::Lifetime;
use crate::observer::{DiObserver, Observers};
use crate::registration::{AnyArc, Ctor, Registration, Registry};

/// Builder for a [`ServiceContainer`].
///
/// Services are keyed by string ids. For controllers the id is usually the
/// controller's type name, which lets the resolver find `Type::action`
/// identifiers in the container. Registering an id twice replaces the first
/// registration.
///
/// # Examples
///
/// ```rust
/// use ferrous_controller::{ContainerExt, ServiceCollection};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserRepository { db: Arc<Database> }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton("database", Database { url: "postgres://localhost".to_string() });
/// services.add_singleton_factory("users", |r| {
///     Ok(UserRepository { db: r.get::<Database>("database")? })
/// });
///
/// let container = services.build();
/// let users = container.get::<UserRepository>("users").unwrap();
/// assert_eq!(users.db.url, "postgres://localhost");
/// ```
#[derive(Default)]
pub struct ServiceCollection {
    registry: Registry,
    observers: Observers,
}

impl ServiceCollection {
    /// Creates a new empty service collection.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            observers: Observers::new(),
        }
    }

    // ----- Plain services -----

    /// Registers an existing value as a shared service.
    pub fn add_singleton<T: 'static + Send + Sync>(&mut self, id: impl Into<String>, value: T) -> &mut Self {
        let arc: AnyArc = Arc::new(value);
        self.registry
            .insert(id, Registration::instance(arc, std::any::type_name::<T>()));
        self
    }

    /// Registers a factory called once, on first resolution; the result is shared.
    pub fn add_singleton_factory<T, F>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> DiResult<T> + Send + Sync + 'static,
    {
        self.add_factory(id, Lifetime::Singleton, factory)
    }

    /// Registers a factory called on every resolution.
    pub fn add_transient_factory<T, F>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> DiResult<T> + Send + Sync + 'static,
    {
        self.add_factory(id, Lifetime::Transient, factory)
    }

    fn add_factory<T, F>(&mut self, id: impl Into<String>, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> DiResult<T> + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |r: &ResolverContext| -> DiResult<AnyArc> {
            Ok(Arc::new(factory(r)?))
        });
        self.registry
            .insert(id, Registration::new(lifetime, ctor, std::any::type_name::<T>()));
        self
    }

    // ----- Controllers -----

    /// Registers an existing controller instance.
    ///
    /// Resolving `id` returns this exact instance, so state set on it (such
    /// as an injected container) is visible to every later request.
    pub fn add_controller(&mut self, id: impl Into<String>, controller: Arc<dyn Controller>) -> &mut Self {
        let type_name = controller.class_name();
        let boxed: AnyArc = Arc::new(controller);
        self.registry.insert(id, Registration::instance(boxed, type_name));
        self
    }

    /// Registers a controller factory.
    ///
    /// Factories of service subscriber controllers typically hand the
    /// container to the new instance through
    /// [`ResolverContext::container`].
    pub fn add_controller_factory<F>(&mut self, id: impl Into<String>, lifetime: Lifetime, factory: F) -> &mut Self
    where
        F: Fn(&ResolverContext) -> DiResult<Arc<dyn Controller>> + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |r: &ResolverContext| -> DiResult<AnyArc> {
            let controller = factory(r)?;
            Ok(Arc::new(controller))
        });
        self.registry.insert(
            id,
            Registration::new(lifetime, ctor, std::any::type_name::<dyn Controller>()),
        );
        self
    }

    // ----- Container shape -----

    /// Makes `alias` resolve to the same service as `target`.
    pub fn add_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) -> &mut Self {
        let alias = alias.into();
        self.registry.services.remove(&alias);
        self.registry.aliases.insert(alias, target.into());
        self
    }

    /// Records `id` as removed at build time.
    ///
    /// Looking it up fails with [`DiError::Removed`](crate::DiError::Removed)
    /// instead of `NotFound`, and the resolver reports it as a private
    /// controller.
    pub fn add_removed_id(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        self.registry.services.remove(&id);
        self.registry.aliases.remove(&id);
        self.registry.removed.insert(id);
        self
    }

    /// Adds an observer notified of every resolution on the built container.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    /// Whether `id` (or an alias of that name) is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    /// Number of registered services, aliases excluded.
    pub fn len(&self) -> usize {
        self.registry.services.len()
    }

    /// Whether no service is registered.
    pub fn is_empty(&self) -> bool {
        self.registry.services.is_empty()
    }

    /// Descriptors of all registrations, sorted by id.
    pub fn get_service_descriptors(&self) -> Vec<ServiceDescriptor> {
        describe(&self.registry)
    }

    /// Builds the container.
    pub fn build(self) -> Arc<ServiceContainer> {
        ServiceContainer::new(self.registry, self.observers)
    }
}
