//! File-backed save slots.

pub mod envelope;
pub mod file_save_repository;
