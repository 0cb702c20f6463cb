//! Core traits for the dependency injection container.

mod container;

pub use container::{same_container, Container, ContainerExt};
