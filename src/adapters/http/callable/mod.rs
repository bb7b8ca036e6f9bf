//! Callable-protocol HTTP adapter for the payment functions.

mod deadline;
pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::CallableAppState;
pub use routes::callable_router;
