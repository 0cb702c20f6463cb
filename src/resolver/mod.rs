//! Controller resolution.
//!
//! [`ControllerResolver`] turns the controller attribute of a [`Request`]
//! into a [`ResolvedController`]: it parses the identifier, finds the target
//! in the container or the class registry, wires the container into
//! container-aware controllers and checks that the requested action exists.

use std::fmt;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::controller::{ClassRegistry, Controller};
use crate::error::{ControllerError, ControllerResult};
use crate::http::{Request, Response};
use crate::internal::fuzzy;
use crate::traits::{same_container, Container, ContainerExt};

mod identifier;

pub use identifier::{ControllerIdentifier, ControllerRef};

/// The callable chosen for a request.
#[derive(Clone)]
pub enum ResolvedController {
    /// A controller instance and the action to run on it
    Action {
        controller: Arc<dyn Controller>,
        action: String,
    },
    /// A controller called as a whole
    Invokable(Arc<dyn Controller>),
}

impl ResolvedController {
    pub fn controller(&self) -> &Arc<dyn Controller> {
        match self {
            ResolvedController::Action { controller, .. } => controller,
            ResolvedController::Invokable(controller) => controller,
        }
    }

    /// Action name, `None` for invokable controllers.
    pub fn action(&self) -> Option<&str> {
        match self {
            ResolvedController::Action { action, .. } => Some(action),
            ResolvedController::Invokable(_) => None,
        }
    }

    /// Whether the resolved instance is exactly `controller`.
    pub fn is_instance<C: ?Sized>(&self, controller: &Arc<C>) -> bool {
        same_container(self.controller(), controller)
    }

    /// Runs the controller for `request`.
    pub fn call(&self, request: &Request) -> ControllerResult<Response> {
        match self {
            ResolvedController::Action { controller, action } => controller.call_action(action, request),
            ResolvedController::Invokable(controller) => controller.invoke(request),
        }
    }
}

impl fmt::Debug for ResolvedController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedController::Action { controller, action } => f
                .debug_struct("Action")
                .field("controller", &controller.class_name())
                .field("action", action)
                .finish(),
            ResolvedController::Invokable(controller) => {
                f.debug_tuple("Invokable").field(&controller.class_name()).finish()
            }
        }
    }
}

/// Resolves request controllers against a container.
///
/// Targets are looked up in the container first and in the
/// [`ClassRegistry`] second. Container-backed controllers are whatever the
/// container returns (the same instance for singletons); class-registry
/// controllers are built fresh for each request.
///
/// After lookup, a controller supporting
/// [`ContainerAware`](crate::ContainerAware) receives the resolver's
/// container if it has none, and a
/// [`ContainerSubscriber`](crate::ContainerSubscriber) without a container
/// is rejected with [`ControllerError::ContainerNotSet`].
///
/// # Examples
///
/// ```
/// use ferrous_controller::{
///     ContainerAware, ContainerSlot, Controller, ControllerResolver, ControllerResult,
///     Request, Response, ServiceCollection,
/// };
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct BlogController {
///     container: ContainerSlot,
/// }
///
/// impl Controller for BlogController {
///     fn actions(&self) -> &'static [&'static str] {
///         &["index"]
///     }
///
///     fn call_action(&self, _action: &str, _request: &Request) -> ControllerResult<Response> {
///         Ok(Response::ok("posts"))
///     }
///
///     fn as_container_aware(&self) -> Option<&dyn ContainerAware> {
///         Some(&self.container)
///     }
/// }
///
/// let controller = Arc::new(BlogController::default());
/// let mut services = ServiceCollection::new();
/// services.add_controller("blog", controller.clone());
/// let container = services.build();
///
/// let resolver = ControllerResolver::new(container);
/// let mut request = Request::create("/blog");
/// request.attributes.set("_controller", "blog::index");
///
/// let resolved = resolver.resolve(&request).unwrap().unwrap();
/// assert!(resolved.is_instance(&controller));
/// assert_eq!(resolved.action(), Some("index"));
/// assert!(controller.container.is_set());
/// assert_eq!(resolved.call(&request).unwrap().body(), "posts");
/// ```
pub struct ControllerResolver {
    container: Arc<dyn Container>,
    classes: ClassRegistry,
    config: ResolverConfig,
}

impl ControllerResolver {
    /// Creates a resolver over `container` with default settings and no
    /// class registry.
    pub fn new(container: Arc<dyn Container>) -> Self {
        Self {
            container,
            classes: ClassRegistry::new(),
            config: ResolverConfig::default(),
        }
    }

    /// Uses `classes` for targets the container does not know.
    pub fn with_classes(mut self, classes: ClassRegistry) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The container injected into container-aware controllers.
    pub fn container(&self) -> &Arc<dyn Container> {
        &self.container
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves the controller of `request`.
    ///
    /// Returns `Ok(None)` when the request has no controller attribute, so
    /// the caller can fall through to its own not-found handling.
    pub fn resolve(&self, request: &Request) -> ControllerResult<Option<ResolvedController>> {
        let attribute = self.config.controller_attribute.as_str();
        let Some(value) = request.attributes.get(attribute) else {
            tracing::warn!(
                target: "ferrous_controller::resolver",
                path = request.path(),
                "Unable to look for the controller as the \"{}\" parameter is missing.",
                attribute
            );
            return Ok(None);
        };

        let resolved = self.resolve_ref(&value.to_controller_ref());
        match &resolved {
            Ok(controller) => tracing::debug!(
                target: "ferrous_controller::resolver",
                uri = %request.uri(),
                controller = controller.controller().class_name(),
                action = controller.action().unwrap_or("__invoke"),
                "controller resolved"
            ),
            Err(err) => tracing::debug!(
                target: "ferrous_controller::resolver",
                uri = %request.uri(),
                error = %err,
                "controller resolution failed"
            ),
        }
        resolved.map(Some)
    }

    /// Resolves a controller reference independent of any request.
    pub fn resolve_ref(&self, reference: &ControllerRef) -> ControllerResult<ResolvedController> {
        match reference {
            ControllerRef::Identifier(raw) => self.resolve_identifier(raw),
            ControllerRef::Pair(target, method) => {
                let controller = self.instantiate(target)?;
                self.configure(&controller, target)?;
                Self::bind_action(controller, target, method)
            }
            ControllerRef::Instance(controller) => {
                Self::bind_invokable(controller.clone(), controller.class_name())
            }
            ControllerRef::Bound(controller, method) => {
                Self::bind_action(controller.clone(), controller.class_name(), method)
            }
        }
    }

    /// Resolves a textual identifier such as `blog::index`.
    pub fn resolve_identifier(&self, raw: &str) -> ControllerResult<ResolvedController> {
        let identifier = ControllerIdentifier::parse_with(raw, &self.config, |target| {
            self.container.has(target) || self.classes.exists(target)
        })?;

        let target = identifier.target();
        let controller = self.instantiate(target)?;
        self.configure(&controller, target)?;

        match identifier.method() {
            Some(method) => Self::bind_action(controller, target, method),
            None => Self::bind_invokable(controller, target),
        }
    }

    /// Fetches `target` from the container, or builds it from the class
    /// registry.
    fn instantiate(&self, target: &str) -> ControllerResult<Arc<dyn Controller>> {
        if self.container.has(target) {
            return Ok(self.container.get_controller(target)?);
        }

        if let Some(controller) = self.classes.instantiate(target) {
            return Ok(controller);
        }

        if self.container.is_removed(target) {
            return Err(ControllerError::Removed(target.to_string()));
        }

        let alternatives = if self.config.suggest_alternatives {
            let service_ids = self.container.service_ids();
            let candidates = service_ids
                .iter()
                .map(String::as_str)
                .chain(self.classes.names());
            fuzzy::alternatives(target, candidates)
        } else {
            Vec::new()
        };

        Err(ControllerError::NotFound {
            identifier: target.to_string(),
            alternatives,
        })
    }

    /// Wires the container according to the controller's capabilities.
    fn configure(&self, controller: &Arc<dyn Controller>, target: &str) -> ControllerResult<()> {
        if let Some(aware) = controller.as_container_aware() {
            if aware.set_container_if_unset(self.container.clone()) {
                tracing::trace!(
                    target: "ferrous_controller::resolver",
                    controller = target,
                    "container injected"
                );
            }
            return Ok(());
        }

        if let Some(subscriber) = controller.as_container_subscriber() {
            if subscriber.container().is_none() {
                return Err(ControllerError::ContainerNotSet(target.to_string()));
            }
        }

        Ok(())
    }

    fn bind_action(
        controller: Arc<dyn Controller>,
        name: &str,
        method: &str,
    ) -> ControllerResult<ResolvedController> {
        if !controller.has_action(method) {
            return Err(ControllerError::MethodNotFound {
                controller: name.to_string(),
                method: method.to_string(),
                alternatives: fuzzy::alternatives(method, controller.actions().iter().copied()),
            });
        }

        Ok(ResolvedController::Action {
            controller,
            action: method.to_string(),
        })
    }

    fn bind_invokable(controller: Arc<dyn Controller>, name: &str) -> ControllerResult<ResolvedController> {
        if !controller.is_invokable() {
            return Err(ControllerError::NotInvokable(name.to_string()));
        }
        Ok(ResolvedController::Invokable(controller))
    }
}

impl fmt::Debug for ControllerResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerResolver")
            .field("classes", &self.classes)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
