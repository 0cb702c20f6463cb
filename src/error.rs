//! Error types for the container and the controller resolver.

use std::fmt;

/// Dependency injection errors
///
/// Represents the error conditions that can occur while registering or
/// resolving services from a [`ServiceContainer`](crate::ServiceContainer).
///
/// # Examples
///
/// ```rust
/// use ferrous_controller::{ContainerExt, DiError, ServiceCollection};
///
/// let container = ServiceCollection::new().build();
/// match container.get::<String>("app.greeting") {
///     Err(DiError::NotFound(id)) => assert_eq!(id, "app.greeting"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// Service not registered
    NotFound(String),
    /// Downcast to the requested type failed
    TypeMismatch(String),
    /// Circular dependency detected (includes path)
    Circular(Vec<String>),
    /// Maximum recursion depth exceeded
    DepthExceeded(usize),
    /// Service id was removed from the container when it was built
    Removed(String),
    /// A factory reported a failure
    Factory { id: String, message: String },
    /// Invalid configuration value or document
    Config(String),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotFound(id) => write!(f, "Service not found: {}", id),
            DiError::TypeMismatch(id) => write!(f, "Type mismatch for: {}", id),
            DiError::Circular(path) => {
                write!(f, "Circular dependency: {}", path.join(" -> "))
            }
            DiError::DepthExceeded(depth) => write!(f, "Max depth {} exceeded", depth),
            DiError::Removed(id) => {
                write!(f, "Service \"{}\" was removed or inlined when the container was built", id)
            }
            DiError::Factory { id, message } => {
                write!(f, "Factory for \"{}\" failed: {}", id, message)
            }
            DiError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for container operations
pub type DiResult<T> = Result<T, DiError>;

/// Errors raised while turning a request into a callable controller.
///
/// Every variant is surfaced to the caller; the resolver never falls back to
/// a different controller on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// The controller attribute could not be parsed (empty target or method)
    InvalidIdentifier(String),
    /// Neither a container service nor a registered class matches the target
    NotFound {
        identifier: String,
        alternatives: Vec<String>,
    },
    /// The target exists in the container's removed ids
    Removed(String),
    /// The resolved controller has no such action
    MethodNotFound {
        controller: String,
        method: String,
        alternatives: Vec<String>,
    },
    /// An invokable form resolved to a controller that cannot be invoked
    NotInvokable(String),
    /// A service subscriber controller reached the resolver without a container
    ContainerNotSet(String),
    /// The action itself failed while handling the request
    Action {
        controller: String,
        action: String,
        message: String,
    },
    /// The container failed while building the controller
    Container(DiError),
}

fn write_alternatives(f: &mut fmt::Formatter<'_>, alternatives: &[String]) -> fmt::Result {
    match alternatives {
        [] => Ok(()),
        [only] => write!(f, " Did you mean \"{}\"?", only),
        many => {
            let quoted: Vec<String> = many.iter().map(|a| format!("\"{}\"", a)).collect();
            write!(f, " Did you mean one of {}?", quoted.join(", "))
        }
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::InvalidIdentifier(id) => {
                write!(f, "Controller identifier \"{}\" is not valid.", id)
            }
            ControllerError::NotFound { identifier, alternatives } => {
                write!(
                    f,
                    "Controller \"{}\" does neither exist as service nor as class.",
                    identifier
                )?;
                write_alternatives(f, alternatives)
            }
            ControllerError::Removed(id) => write!(
                f,
                "Controller \"{}\" cannot be fetched from the container because it is private. \
                 Did you forget to register it as a controller service?",
                id
            ),
            ControllerError::MethodNotFound { controller, method, alternatives } => {
                write!(f, "Expected method \"{}\" on controller \"{}\".", method, controller)?;
                write_alternatives(f, alternatives)
            }
            ControllerError::NotInvokable(id) => {
                write!(f, "Controller \"{}\" cannot be called without a method name.", id)
            }
            ControllerError::ContainerNotSet(id) => write!(
                f,
                "\"{}\" has no container set, did you forget to define it as a service subscriber?",
                id
            ),
            ControllerError::Action { controller, action, message } => {
                write!(f, "Action \"{}::{}\" failed: {}", controller, action, message)
            }
            ControllerError::Container(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Container(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DiError> for ControllerError {
    fn from(err: DiError) -> Self {
        ControllerError::Container(err)
    }
}

/// Result type for controller resolution and dispatch
pub type ControllerResult<T> = Result<T, ControllerError>;
