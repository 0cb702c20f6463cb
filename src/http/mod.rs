//! Minimal HTTP request/response types the resolver works against.

mod request;
mod response;

pub use request::{AttributeValue, ParameterBag, Request};
pub use response::Response;
