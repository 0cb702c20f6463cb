use std::sync::Arc;

use crate::internal::RwLock;
use crate::traits::Container;

/// Capability of receiving a container after construction.
///
/// The resolver only ever calls
/// [`set_container_if_unset`](Self::set_container_if_unset), so a container
/// set earlier (by a factory or a previous request) is never
/// replaced.
pub trait ContainerAware: Send + Sync {
    /// Stores (or clears) the container.
    fn set_container(&self, container: Option<Arc<dyn Container>>);

    /// The container currently held.
    fn container(&self) -> Option<Arc<dyn Container>>;

    /// Stores `container` only if none is held. Returns whether it was stored.
    ///
    /// The check and the store must be one atomic step: concurrent requests
    /// resolving the same shared controller call this at the same time, and
    /// exactly one of them may return `true`. Delegating to a
    /// [`ContainerSlot`] satisfies this.
    fn set_container_if_unset(&self, container: Arc<dyn Container>) -> bool;
}

/// Thread-safe storage for a controller's container.
///
/// Controllers embed a slot and delegate [`ContainerAware`] to it.
///
/// # Examples
///
/// ```
/// use ferrous_controller::{
///     ContainerAware, ContainerSlot, Controller, ControllerResult, Request, Response,
/// };
///
/// #[derive(Default)]
/// struct AdminController {
///     container: ContainerSlot,
/// }
///
/// impl Controller for AdminController {
///     fn actions(&self) -> &'static [&'static str] {
///         &["dashboard"]
///     }
///
///     fn call_action(&self, _action: &str, _request: &Request) -> ControllerResult<Response> {
///         Ok(Response::ok("dashboard"))
///     }
///
///     fn as_container_aware(&self) -> Option<&dyn ContainerAware> {
///         Some(&self.container)
///     }
/// }
///
/// let controller = AdminController::default();
/// assert!(controller.as_container_aware().unwrap().container().is_none());
/// ```
#[derive(Default)]
pub struct ContainerSlot {
    inner: RwLock<Option<Arc<dyn Container>>>,
}

impl ContainerSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot already holding `container`.
    pub fn with_container(container: Arc<dyn Container>) -> Self {
        Self { inner: RwLock::new(Some(container)) }
    }

    /// Whether a container is held.
    pub fn is_set(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Stores `container`, returning the previous one.
    pub fn replace(&self, container: Option<Arc<dyn Container>>) -> Option<Arc<dyn Container>> {
        std::mem::replace(&mut *self.inner.write(), container)
    }
}

impl std::fmt::Debug for ContainerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerSlot")
            .field("is_set", &self.is_set())
            .finish()
    }
}

impl ContainerAware for ContainerSlot {
    fn set_container(&self, container: Option<Arc<dyn Container>>) {
        self.replace(container);
    }

    fn container(&self) -> Option<Arc<dyn Container>> {
        self.inner.read().clone()
    }

    fn set_container_if_unset(&self, container: Arc<dyn Container>) -> bool {
        let mut slot = self.inner.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(container);
        true
    }
}
