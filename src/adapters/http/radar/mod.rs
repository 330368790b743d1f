//! Relationship radar HTTP module.

pub mod handlers;
pub mod routes;

pub use handlers::RadarAppState;
pub use routes::radar_routes;
