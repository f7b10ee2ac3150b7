//! Security checker - a declarative security scenario runner
//!
//! Issues a catalog of adversarial HTTP requests (bad auth, CSRF bypass,
//! malicious uploads, IDOR, injection, XSS) against a target application
//! and decides pass/fail from status codes and body checks.

pub mod cli;
pub mod commands;
pub mod common;
pub mod http;
pub mod report;
pub mod runner;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use scenario::{Check, Scenario, Severity};
