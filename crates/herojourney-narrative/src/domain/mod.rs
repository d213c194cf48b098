//! Domain types for the Narrative context.

pub mod chronicle;
pub mod curve;
pub mod history;
pub mod pool;
pub mod selection;
