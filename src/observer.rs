//! Diagnostic observers for container resolution events.
//!
//! Observers are registered on the [`ServiceCollection`](crate::ServiceCollection)
//! and notified synchronously while the built container resolves services.

use std::sync::Arc;
use std::time::Duration;

/// Observer trait for dependency injection resolution events.
///
/// Observer calls are made synchronously during resolution, so keep
/// implementations lightweight.
///
/// # Examples
///
/// ```
/// use ferrous_controller::{DiObserver, ServiceCollection};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     seen: Mutex<Vec<String>>,
/// }
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, id: &str) {
///         self.seen.lock().unwrap().push(id.to_string());
///     }
///
///     fn resolved(&self, _id: &str, _duration: Duration) {}
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let mut services = ServiceCollection::new();
/// services.add_singleton("app.name", "demo".to_string());
/// services.add_observer(recorder.clone());
///
/// let container = services.build();
/// let _ = ferrous_controller::ContainerExt::get::<String>(&*container, "app.name");
/// assert_eq!(*recorder.seen.lock().unwrap(), vec!["app.name".to_string()]);
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a registered service is built or fetched from cache.
    fn resolving(&self, id: &str);

    /// Called after a service was resolved successfully.
    fn resolved(&self, id: &str, duration: Duration);

    /// Called when a lookup targets an id the container does not know.
    fn not_found(&self, id: &str) {
        let _ = id;
    }

    /// Called when a factory or a nested resolution fails.
    fn failed(&self, id: &str, error: &crate::DiError) {
        let _ = (id, error);
    }
}

/// Container for registered observers.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn resolving(&self, id: &str) {
        for observer in &self.observers {
            observer.resolving(id);
        }
    }

    pub(crate) fn resolved(&self, id: &str, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(id, duration);
        }
    }

    pub(crate) fn not_found(&self, id: &str) {
        for observer in &self.observers {
            observer.not_found(id);
        }
    }

    pub(crate) fn failed(&self, id: &str, error: &crate::DiError) {
        for observer in &self.observers {
            observer.failed(id, error);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
///
/// Resolutions are logged at `TRACE`, misses at `DEBUG` and failures at
/// `WARN`, all under the `ferrous_controller::container` target.
///
/// # Examples
///
/// ```
/// use ferrous_controller::{LoggingObserver, ServiceCollection};
/// use std::sync::Arc;
///
/// let mut services = ServiceCollection::new();
/// services.add_observer(Arc::new(LoggingObserver::new()));
/// let _container = services.build();
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self { prefix: "[ferrous-controller]".to_string() }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, id: &str) {
        tracing::trace!(target: "ferrous_controller::container", service = id, "{} resolving", self.prefix);
    }

    fn resolved(&self, id: &str, duration: Duration) {
        tracing::trace!(
            target: "ferrous_controller::container",
            service = id,
            elapsed_us = duration.as_micros() as u64,
            "{} resolved",
            self.prefix
        );
    }

    fn not_found(&self, id: &str) {
        tracing::debug!(target: "ferrous_controller::container", service = id, "{} not found", self.prefix);
    }

    fn failed(&self, id: &str, error: &crate::DiError) {
        tracing::warn!(
            target: "ferrous_controller::container",
            service = id,
            error = %error,
            "{} resolution failed",
            self.prefix
        );
    }
}
