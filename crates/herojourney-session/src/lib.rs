//! Hero Journey: Session & Progression bounded context.
//!
//! Responsible for the playthrough lifecycle: starting rounds, applying
//! choices, reaching the final confrontation or a game over, and saving and
//! restoring the whole playthrough through save slots.

pub mod application;
pub mod domain;
