//! Message refinement HTTP module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::MessagesAppState;
pub use routes::messages_routes;
