//! Security scenarios
//!
//! The catalog is a static table of adversarial requests. Each entry is
//! self-contained so filtering and sorting never change its outcome.

mod catalog;
mod check;
mod loader;
mod types;

pub use catalog::{builtin_catalog, validate_catalog, PayloadSet};
pub use check::{contains_ignore_case, Check, CheckOutcome};
pub use loader::{load_scenario_file, parse_scenarios};
pub use types::{FileAttachment, HttpMethod, Scenario, Severity};
