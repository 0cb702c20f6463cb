//! Service lifetime definitions.

/// Service lifetimes controlling instance caching behavior
///
/// Controllers backed by the container are usually singletons, which is what
/// makes repeated resolution of the same identifier return the same object.
///
/// # Examples
///
/// ```rust
/// use ferrous_controller::{ContainerExt, ServiceCollection};
/// use std::sync::Arc;
///
/// struct Mailer;
/// struct RequestStamp;
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton_factory("mailer", |_| Ok(Mailer));
/// services.add_transient_factory("stamp", |_| Ok(RequestStamp));
///
/// let container = services.build();
///
/// let a = container.get::<Mailer>("mailer").unwrap();
/// let b = container.get::<Mailer>("mailer").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// let c = container.get::<RequestStamp>("stamp").unwrap();
/// let d = container.get::<RequestStamp>("stamp").unwrap();
/// assert!(!Arc::ptr_eq(&c, &d));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifetime {
    /// Single instance per container, created on first request and cached
    Singleton,
    /// New instance per resolution, never cached
    Transient,
}

impl Lifetime {
    /// Whether instances of this lifetime are cached by the container.
    pub fn is_shared(&self) -> bool {
        matches!(self, Lifetime::Singleton)
    }
}
