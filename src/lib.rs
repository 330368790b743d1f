//! Harmony - relationship wellness backend.
//!
//! Couples exchange tone-adjusted messages, talk to an AI relationship
//! coach, and get a "relationship radar" of derived insights. The AI core
//! degrades gracefully: with no provider credential, messages pass through
//! unrefined, the coach answers with fixed supportive prompts, and the radar
//! shows an onboarding insight - nothing ever blocks the user flow.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
