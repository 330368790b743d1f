//! Ports - trait boundaries between the core and the outside world.
//!
//! Adapters in `crate::adapters` implement these; application services in
//! `crate::application` depend only on the traits.

pub mod session_auth;
pub mod store;
pub mod text_generation;

pub use session_auth::{AuthError, AuthenticatedUser, SessionValidator};
pub use store::{
    CalendarEvent, CalendarStore, CoachingStore, MessageStore, ProfileStore, StoredMessage,
};
pub use text_generation::{CompletionRequest, GatewayError, TextGenerationGateway};
