//! # ferrous-controller
//!
//! Controller resolution for HTTP requests on top of a string-keyed
//! dependency injection container.
//!
//! ## Features
//!
//! - **Identifier resolution**: `Type::action`, `service_id::action`,
//!   invokable types and services, plus typed references
//! - **Container-aware injection**: controllers that accept a container get
//!   the ambient one, without overwriting a container set earlier
//! - **Subscriber guard**: controllers that expect a pre-wired container fail
//!   loudly instead of running half-configured
//! - **Thread-safe container**: singleton and transient services, aliases,
//!   runtime overrides and circular dependency detection
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_controller::{
//!     ContainerAware, ContainerSlot, Controller, ControllerResolver, ControllerResult,
//!     Request, Response, ServiceCollection,
//! };
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct ProductController {
//!     container: ContainerSlot,
//! }
//!
//! impl Controller for ProductController {
//!     fn actions(&self) -> &'static [&'static str] {
//!         &["list", "show"]
//!     }
//!
//!     fn call_action(&self, action: &str, request: &Request) -> ControllerResult<Response> {
//!         Ok(Response::ok(format!("{} {}", action, request.path())))
//!     }
//!
//!     fn as_container_aware(&self) -> Option<&dyn ContainerAware> {
//!         Some(&self.container)
//!     }
//! }
//!
//! let mut services = ServiceCollection::new();
//! services.add_controller(
//!     std::any::type_name::<ProductController>(),
//!     Arc::new(ProductController::default()),
//! );
//! let resolver = ControllerResolver::new(services.build());
//!
//! let mut request = Request::create("/products");
//! request.attributes.set(
//!     "_controller",
//!     format!("{}::list", std::any::type_name::<ProductController>()),
//! );
//!
//! let controller = resolver.resolve(&request).unwrap().expect("controller attribute is set");
//! assert_eq!(controller.action(), Some("list"));
//! assert_eq!(controller.call(&request).unwrap().body(), "list /products");
//! ```
//!
//! ## Identifiers
//!
//! The `_controller` attribute is split on the **last** `::`, so Rust type
//! paths work as targets. When the whole string names a registered service
//! or class it is treated as an invokable target instead. The legacy
//! `service:method` notation is accepted (and logged as deprecated) unless
//! [`ResolverConfig::allow_single_colon`] is turned off.

pub mod collection;
pub mod config;
pub mod container;
pub mod controller;
pub mod descriptors;
pub mod error;
pub mod http;
pub mod lifetime;
pub mod observer;
pub mod resolver;
pub mod traits;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use collection::ServiceCollection;
pub use config::{ConfigSource, ConfigValue, EnvironmentConfigSource, MapConfigSource, ResolverConfig};
pub use container::{ResolverContext, ServiceContainer};
pub use controller::{
    AbstractController, Capability, ClassRegistry, ContainerAware, ContainerSlot, ContainerSubscriber,
    Controller,
};
pub use descriptors::ServiceDescriptor;
pub use error::{ControllerError, ControllerResult, DiError, DiResult};
pub use http::{AttributeValue, ParameterBag, Request, Response};
pub use lifetime::Lifetime;
pub use observer::{DiObserver, LoggingObserver};
pub use resolver::{ControllerIdentifier, ControllerRef, ControllerResolver, ResolvedController};
pub use traits::{same_container, Container, ContainerExt};
