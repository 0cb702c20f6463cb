use std::sync::Arc;

use crate::controller::aware::{ContainerAware, ContainerSlot};
use crate::error::{ControllerError, ControllerResult};
use crate::traits::{Container, ContainerExt};

/// Capability of controllers that read services from a container wired at
/// registration time.
///
/// Unlike [`ContainerAware`], the resolver never injects into a subscriber.
/// A subscriber resolved without a container is a wiring mistake and fails
/// with [`ControllerError::ContainerNotSet`].
pub trait ContainerSubscriber: Send + Sync {
    /// Stores `container`, returning the previous one.
    fn set_container(&self, container: Arc<dyn Container>) -> Option<Arc<dyn Container>>;

    /// The container currently held.
    fn container(&self) -> Option<Arc<dyn Container>>;
}

/// Reusable base for service subscriber controllers.
///
/// Embed it in a controller, return it from
/// [`Controller::as_container_subscriber`](crate::Controller::as_container_subscriber)
/// and use [`has`](Self::has) / [`get`](Self::get) to reach services.
///
/// # Examples
///
/// ```
/// use ferrous_controller::{
///     AbstractController, ContainerSubscriber, Controller, ControllerResult, Lifetime,
///     Request, Response, ServiceCollection,
/// };
/// use std::sync::Arc;
///
/// struct GreetingController {
///     base: AbstractController,
/// }
///
/// impl Controller for GreetingController {
///     fn actions(&self) -> &'static [&'static str] {
///         &["hello"]
///     }
///
///     fn call_action(&self, _action: &str, _request: &Request) -> ControllerResult<Response> {
///         let greeting = self.base.get::<String>("greeting")?;
///         Ok(Response::ok(greeting.as_str()))
///     }
///
///     fn as_container_subscriber(&self) -> Option<&dyn ContainerSubscriber> {
///         Some(&self.base)
///     }
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton("greeting", "hello".to_string());
/// services.add_controller_factory("greeting_controller", Lifetime::Singleton, |r| {
///     let base = AbstractController::new();
///     if let Some(container) = r.container() {
///         base.set_container(container);
///     }
///     let controller: Arc<dyn Controller> = Arc::new(GreetingController { base });
///     Ok(controller)
/// });
/// let _container = services.build();
/// ```
#[derive(Debug)]
pub struct AbstractController {
    slot: ContainerSlot,
    /// Controller named in `ContainerNotSet` errors raised by `get`
    owner: &'static str,
}

impl Default for AbstractController {
    fn default() -> Self {
        Self {
            slot: ContainerSlot::new(),
            owner: std::any::type_name::<Self>(),
        }
    }
}

impl AbstractController {
    /// Creates a base without a container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a base without a container that reports `C` as the
    /// controller missing one.
    pub fn for_controller<C: ?Sized + 'static>() -> Self {
        Self {
            owner: std::any::type_name::<C>(),
            ..Self::default()
        }
    }

    /// Creates a base holding `container`.
    pub fn with_container(container: Arc<dyn Container>) -> Self {
        Self {
            slot: ContainerSlot::with_container(container),
            ..Self::default()
        }
    }

    /// Name reported when [`get`](Self::get) finds no container.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Whether the held container knows `id`. `false` without a container.
    pub fn has(&self, id: &str) -> bool {
        self.slot
            .container()
            .map(|container| container.has(id))
            .unwrap_or(false)
    }

    /// Resolves `id` from the held container.
    ///
    /// Fails with [`ControllerError::ContainerNotSet`] naming
    /// [`owner`](Self::owner) when no container is held.
    pub fn get<T: Send + Sync + 'static>(&self, id: &str) -> ControllerResult<Arc<T>> {
        let container = self
            .slot
            .container()
            .ok_or_else(|| ControllerError::ContainerNotSet(self.owner.to_string()))?;
        Ok(container.get::<T>(id)?)
    }
}

impl ContainerSubscriber for AbstractController {
    fn set_container(&self, container: Arc<dyn Container>) -> Option<Arc<dyn Container>> {
        self.slot.replace(Some(container))
    }

    fn container(&self) -> Option<Arc<dyn Container>> {
        ContainerAware::container(&self.slot)
    }
}
