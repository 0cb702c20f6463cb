use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::controller::Controller;

type Constructor = Arc<dyn Fn() -> Arc<dyn Controller> + Send + Sync>;

/// Constructors for controllers that live outside the container.
///
/// When an identifier's target is not a container service, the resolver
/// looks it up here and builds a fresh instance for the request. Names are
/// usually the controller's type name.
///
/// # Examples
///
/// ```
/// use ferrous_controller::{ClassRegistry, Controller, ControllerResult, Request, Response};
///
/// #[derive(Default)]
/// struct AboutController;
///
/// impl Controller for AboutController {
///     fn actions(&self) -> &'static [&'static str] {
///         &["show"]
///     }
///
///     fn call_action(&self, _action: &str, _request: &Request) -> ControllerResult<Response> {
///         Ok(Response::ok("about"))
///     }
/// }
///
/// let mut classes = ClassRegistry::new();
/// classes.register::<AboutController>();
///
/// let name = std::any::type_name::<AboutController>();
/// assert!(classes.exists(name));
/// assert!(classes.instantiate(name).is_some());
/// assert!(classes.instantiate("app::Missing").is_none());
/// ```
#[derive(Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Constructor>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `C` under its type name.
    pub fn register<C: Controller + Default>(&mut self) -> &mut Self {
        self.register_as::<C>(std::any::type_name::<C>())
    }

    /// Registers `C` under `name`.
    pub fn register_as<C: Controller + Default>(&mut self, name: impl Into<String>) -> &mut Self {
        self.register_with(name, || Arc::new(C::default()) as Arc<dyn Controller>)
    }

    /// Registers a custom constructor under `name`.
    pub fn register_with<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> Arc<dyn Controller> + Send + Sync + 'static,
    {
        self.classes.insert(name.into(), Arc::new(constructor));
        self
    }

    /// Whether a constructor is registered under `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Builds a fresh instance of `name`.
    pub fn instantiate(&self, name: &str) -> Option<Arc<dyn Controller>> {
        self.classes.get(name).map(|constructor| constructor())
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ClassRegistry").field("classes", &names).finish()
    }
}
