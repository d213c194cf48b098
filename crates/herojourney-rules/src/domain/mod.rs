//! Domain logic for the Rules context.

pub mod balance;
pub mod confrontation;
pub mod effects;
pub mod resolution;
