//! Application services for the Content context.

pub mod catalog_service;
pub mod loader;
