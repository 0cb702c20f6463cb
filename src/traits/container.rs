//! Container traits used by the resolver and by controllers.

use std::any::Any;
use std::sync::Arc;

use crate::controller::Controller;
use crate::error::{DiError, DiResult};

/// Object-safe view of a dependency injection container.
///
/// This is the seam between the controller resolver and whatever registry
/// backs it. [`ServiceContainer`](crate::ServiceContainer) is the built-in
/// implementation; a host framework can implement this trait for its own
/// container and hand it to the resolver as `Arc<dyn Container>`.
///
/// Implementations must be safe for concurrent reads.
pub trait Container: Send + Sync {
    /// Whether `id` can be resolved.
    fn has(&self, id: &str) -> bool;

    /// Resolves the service registered under `id`.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The resolved service wrapped in `Arc<dyn Any>`
    /// * `Err(DiError)` - Resolution error (not found, circular, factory failure)
    fn resolve_any(&self, id: &str) -> DiResult<Arc<dyn Any + Send + Sync>>;

    /// Whether `id` was removed from the container when it was built.
    fn is_removed(&self, id: &str) -> bool {
        let _ = id;
        false
    }

    /// Known service ids, used for suggestions in error messages.
    fn service_ids(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Typed resolution helpers available on every [`Container`].
///
/// # Examples
///
/// ```
/// use ferrous_controller::{ContainerExt, ServiceCollection};
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton("app.name", "shop".to_string());
///
/// let container = services.build();
/// assert_eq!(&*container.get::<String>("app.name").unwrap(), "shop");
/// assert!(container.try_get::<String>("app.missing").is_none());
/// assert!(container.get::<u32>("app.name").is_err());
/// ```
pub trait ContainerExt: Container {
    /// Resolves `id` and downcasts it to `T`.
    fn get<T: Send + Sync + 'static>(&self, id: &str) -> DiResult<Arc<T>> {
        let any = self.resolve_any(id)?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(id.to_string()))
    }

    /// Resolves `id` if it is registered with type `T`.
    fn try_get<T: Send + Sync + 'static>(&self, id: &str) -> Option<Arc<T>> {
        if !self.has(id) {
            return None;
        }
        self.get::<T>(id).ok()
    }

    /// Resolves a controller registered with `add_controller` or
    /// `add_controller_factory`.
    fn get_controller(&self, id: &str) -> DiResult<Arc<dyn Controller>> {
        let any = self.resolve_any(id)?;
        any.downcast::<Arc<dyn Controller>>()
            .map(|controller| Arc::clone(&*controller))
            .map_err(|_| DiError::TypeMismatch(id.to_string()))
    }
}

impl<C: Container + ?Sized> ContainerExt for C {}

/// Whether two handles point at the same underlying object.
///
/// Compares data pointers only, so an `Arc<ServiceContainer>` and the
/// `Arc<dyn Container>` made from it compare equal.
pub fn same_container<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
