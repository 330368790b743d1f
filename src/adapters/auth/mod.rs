//! Session validation adapters.

mod mock;

pub use mock::MockSessionValidator;
