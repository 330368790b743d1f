//! Coaching HTTP module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::CoachingAppState;
pub use routes::coaching_routes;
