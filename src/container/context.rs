//! Resolver context handed to factory functions.

use std::sync::Arc;

use crate::container::ServiceContainer;
use crate::error::DiResult;
use crate::registration::AnyArc;
use crate::traits::Container;

/// Context passed to factory functions for resolving dependencies.
///
/// Lookups made through the context take part in circular dependency
/// detection for the service being built.
///
/// # Examples
///
/// ```
/// use ferrous_controller::{ContainerExt, DiError, ServiceCollection};
///
/// struct A;
/// struct B;
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton_factory("a", |r| { r.get::<B>("b")?; Ok(A) });
/// services.add_singleton_factory("b", |r| { r.get::<A>("a")?; Ok(B) });
///
/// let container = services.build();
/// match container.get::<A>("a") {
///     Err(DiError::Circular(path)) => assert_eq!(path, vec!["a", "b", "a"]),
///     _ => unreachable!(),
/// }
/// ```
pub struct ResolverContext<'a> {
    container: &'a ServiceContainer,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new(container: &'a ServiceContainer) -> Self {
        Self { container }
    }

    /// Shared handle to the container being resolved from.
    ///
    /// Service subscriber controllers get their container from here when
    /// their factory builds them.
    pub fn container(&self) -> Option<Arc<dyn Container>> {
        self.container.handle()
    }
}

impl<'a> Container for ResolverContext<'a> {
    fn has(&self, id: &str) -> bool {
        self.container.has(id)
    }

    fn resolve_any(&self, id: &str) -> DiResult<AnyArc> {
        self.container.resolve_any(id)
    }

    fn is_removed(&self, id: &str) -> bool {
        self.container.is_removed(id)
    }

    fn service_ids(&self) -> Vec<String> {
        self.container.service_ids()
    }
}
