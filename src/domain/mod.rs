//! Domain types for the relationship-wellness core.
//!
//! Everything here is plain data: the vibe catalog, refinement results,
//! conversation turns, profile context, and radar insights. All AI
//! orchestration lives in `crate::application`; all I/O behind
//! `crate::ports`.

pub mod coaching;
pub mod errors;
pub mod profile;
pub mod radar;
pub mod refinement;
pub mod vibe;

pub use coaching::{CoachingSession, ConversationTurn, SessionMessage, Speaker};
pub use errors::{DomainError, ErrorCode};
pub use profile::{MaritalStatus, RelationshipCondition, UserProfileContext};
pub use radar::{InsightKind, RadarInsight, Severity};
pub use refinement::{AliasContext, RefinedMessage, RefinementRequest, VibeVariants};
