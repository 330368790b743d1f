//! Application services - the AI orchestration core.
//!
//! Each service owns one flow: message refinement, coach dialogue, or radar
//! aggregation. They hold no cross-request state; everything durable lives
//! behind the store ports.

pub mod coach;
pub mod radar;
pub mod refiner;

pub use coach::CoachDialogueEngine;
pub use radar::RelationshipRadar;
pub use refiner::MessageRefiner;
