//! Hero Journey: Content catalog bounded context.
//!
//! Responsible for the story node model, loading and validating node
//! documents, the built-in fallback catalog, versioning by fingerprint,
//! and the session-owned catalog cache.

pub mod application;
pub mod domain;
