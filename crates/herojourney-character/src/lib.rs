//! Hero Journey: Character bounded context.
//!
//! Responsible for the hero's nine attributes, effective-stat modifiers,
//! terminal mental states, and the background templates a playthrough
//! starts from.

pub mod application;
pub mod domain;
