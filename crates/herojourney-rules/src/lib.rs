//! Hero Journey: Rules & Resolution bounded context.
//!
//! Responsible for picking the outcome of a played node, applying its
//! effects to the hero, judging the final confrontation, and checking
//! content balance.

pub mod domain;
