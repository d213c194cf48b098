//! Application services for the Character context.

pub mod hero_creation;
