//! Domain model for the Character context.

pub mod backgrounds;
pub mod stats;
