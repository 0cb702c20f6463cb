//! Controllers and the capabilities the resolver looks for on them.
//!
//! A controller is any `Send + Sync` object implementing [`Controller`]. It
//! declares its actions, handles them, and optionally exposes one of two
//! container capabilities:
//!
//! - [`ContainerAware`]: the resolver injects the ambient container when the
//!   controller has none yet.
//! - [`ContainerSubscriber`]: the controller expects its container to be
//!   wired when it is registered; reaching the resolver without one is an
//!   error.

use crate::error::{ControllerError, ControllerResult};
use crate::http::{Request, Response};

mod aware;
mod classes;
mod subscriber;

pub use aware::{ContainerAware, ContainerSlot};
pub use classes::ClassRegistry;
pub use subscriber::{AbstractController, ContainerSubscriber};

/// Container capabilities a controller may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Accepts the ambient container from the resolver
    ContainerAware,
    /// Requires its container to be set before resolution
    ContainerSubscriber,
}

/// A request handler.
///
/// # Examples
///
/// ```
/// use ferrous_controller::{Controller, ControllerError, ControllerResult, Request, Response};
///
/// struct HealthController;
///
/// impl Controller for HealthController {
///     fn actions(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     fn call_action(&self, action: &str, _request: &Request) -> ControllerResult<Response> {
///         match action {
///             "ping" => Ok(Response::ok("pong")),
///             other => Err(ControllerError::MethodNotFound {
///                 controller: self.class_name().to_string(),
///                 method: other.to_string(),
///                 alternatives: Vec::new(),
///             }),
///         }
///     }
/// }
///
/// let controller = HealthController;
/// assert!(controller.has_action("ping"));
/// assert_eq!(controller.call_action("ping", &Request::create("/")).unwrap().body(), "pong");
/// ```
pub trait Controller: Send + Sync + 'static {
    /// Names of the actions this controller handles.
    fn actions(&self) -> &'static [&'static str];

    /// Whether `action` is one of [`actions`](Self::actions).
    fn has_action(&self, action: &str) -> bool {
        self.actions().contains(&action)
    }

    /// Runs `action` for `request`.
    fn call_action(&self, action: &str, request: &Request) -> ControllerResult<Response>;

    /// Whether the controller can be called without an action name.
    fn is_invokable(&self) -> bool {
        false
    }

    /// Runs the controller as a whole.
    fn invoke(&self, request: &Request) -> ControllerResult<Response> {
        let _ = request;
        Err(ControllerError::NotInvokable(self.class_name().to_string()))
    }

    /// Container-aware capability, if supported.
    fn as_container_aware(&self) -> Option<&dyn ContainerAware> {
        None
    }

    /// Service subscriber capability, if supported.
    fn as_container_subscriber(&self) -> Option<&dyn ContainerSubscriber> {
        None
    }

    /// Whether the controller supports `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::ContainerAware => self.as_container_aware().is_some(),
            Capability::ContainerSubscriber => self.as_container_subscriber().is_some(),
        }
    }

    /// Fully qualified type name, used in diagnostics.
    fn class_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
