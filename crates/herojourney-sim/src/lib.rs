//! Hero Journey headless driver.

pub mod driver;
pub mod error;
