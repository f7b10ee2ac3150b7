//! Response body checks
//!
//! Status-code matching cannot express every assertion ("the body must not
//! echo `<script`"). A [`Check`] adds one predicate over the response.

use serde::{Deserialize, Serialize};

use crate::http::HttpResponse;

/// Extra pass/fail predicate evaluated after the status code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    /// Status code is the only criterion
    #[default]
    None,
    /// Body must contain the keyword (case-insensitive)
    MustContain { keyword: String },
    /// Body must not contain the keyword (case-insensitive)
    MustNotContain { keyword: String },
    /// Body must not echo an opening script tag
    NoScriptTag,
    /// Pass outright on `status`; otherwise the body must contain `keyword`
    StatusOrContains { status: u16, keyword: String },
}

/// Result of applying a check to a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub passed: bool,
    /// Human note; empty when there is nothing to say
    pub note: String,
}

impl CheckOutcome {
    fn new(passed: bool, note: impl Into<String>) -> Self {
        Self {
            passed,
            note: note.into(),
        }
    }
}

impl Check {
    pub fn must_contain(keyword: &str) -> Self {
        Check::MustContain {
            keyword: keyword.to_string(),
        }
    }

    pub fn must_not_contain(keyword: &str) -> Self {
        Check::MustNotContain {
            keyword: keyword.to_string(),
        }
    }

    pub fn status_or_contains(status: u16, keyword: &str) -> Self {
        Check::StatusOrContains {
            status,
            keyword: keyword.to_string(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Check::None)
    }

    /// Apply the check, or `None` when there is no check to run
    pub fn apply(&self, response: &HttpResponse) -> Option<CheckOutcome> {
        let outcome = match self {
            Check::None => return None,
            Check::MustContain { keyword } => contains_outcome(&response.body, keyword),
            Check::MustNotContain { keyword } => {
                if contains_ignore_case(&response.body, keyword) {
                    CheckOutcome::new(false, format!("body leaked '{}'", keyword))
                } else {
                    CheckOutcome::new(true, format!("body does not contain '{}'", keyword))
                }
            }
            Check::NoScriptTag => {
                if contains_ignore_case(&response.body, "<script") {
                    CheckOutcome::new(false, "script tag echoed")
                } else {
                    CheckOutcome::new(true, "sanitized output")
                }
            }
            Check::StatusOrContains { status, keyword } => {
                if response.status == *status {
                    CheckOutcome::new(true, "")
                } else {
                    contains_outcome(&response.body, keyword)
                }
            }
        };
        Some(outcome)
    }
}

fn contains_outcome(body: &str, keyword: &str) -> CheckOutcome {
    if contains_ignore_case(body, keyword) {
        CheckOutcome::new(true, format!("body contains '{}'", keyword))
    } else {
        CheckOutcome::new(false, format!("body missing '{}'", keyword))
    }
}

/// Case-insensitive substring search
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
