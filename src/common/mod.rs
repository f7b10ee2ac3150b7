//! Common utilities shared across the checker

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};
