//! Shared test mocks and utilities for the Hero Journey engine.

mod clock;
pub mod fixtures;
mod repository;
mod rng;

pub use clock::{FixedClock, ManualClock};
pub use repository::{EmptySaveRepository, FailingSaveRepository, InMemorySaveRepository};
pub use rng::{MockRng, SequenceRng};
