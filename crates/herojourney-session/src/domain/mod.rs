//! Domain types for the Session context.

pub mod commands;
pub mod playthrough;
pub mod results;
pub mod save_state;
