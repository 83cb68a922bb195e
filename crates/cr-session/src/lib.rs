//! Mutable collaborators around the router: running statistics and
//! per-session model overrides.

pub mod error;
pub mod overrides;
pub mod stats;

pub use error::{Result, SessionError};
pub use overrides::{SessionOverride, SessionOverrideStore};
pub use stats::{RouterStats, StatsTracker};

#[cfg(test)]
mod tests;
