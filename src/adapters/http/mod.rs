//! HTTP adapters - callable-protocol endpoints, middleware and the
//! ambient tower-http layer stack.

pub mod callable;
pub mod layers;
pub mod middleware;

pub use callable::{callable_router, CallableAppState};
pub use layers::with_ambient_layers;
