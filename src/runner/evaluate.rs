//! Outcome evaluation
//!
//! Pure functions: the same response and scenario always give the same
//! verdict and detail text.

use crate::common::Result;
use crate::http::HttpResponse;
use crate::scenario::Scenario;

/// Status reported when no response was obtained
pub const TRANSPORT_FAILURE_STATUS: i32 = -1;

/// Maximum number of body characters shown in verbose detail
pub const BODY_SNIPPET_CHARS: usize = 240;

/// Verdict for one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub passed: bool,
    /// HTTP status, or [`TRANSPORT_FAILURE_STATUS`]
    pub observed_status: i32,
    pub detail: String,
}

/// Whether `actual` is one of the expected status codes
pub fn status_match(expected: &[u16], actual: u16) -> bool {
    expected.contains(&actual)
}

/// Decide pass/fail for a scenario given what the transport returned
pub fn evaluate(outcome: &Result<HttpResponse>, scenario: &Scenario, verbose: bool) -> Evaluation {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            return Evaluation {
                passed: false,
                observed_status: TRANSPORT_FAILURE_STATUS,
                detail: format!("Request error: {}", e),
            }
        }
    };

    let mut passed = status_match(&scenario.expected_statuses, response.status);
    let mut parts = vec![
        format!("{} {}", scenario.method, scenario.path),
        format!("status {}", response.status),
        format!("expected {}", scenario.expected_display()),
    ];

    if let Some(check) = scenario.check.apply(response) {
        passed = passed && check.passed;
        if !check.note.is_empty() {
            parts.push(check.note);
        }
    }

    if verbose {
        if let Some(snippet) = body_snippet(&response.body) {
            parts.push(format!("body: {}", snippet));
        }
    }

    Evaluation {
        passed,
        observed_status: i32::from(response.status),
        detail: parts.join("; "),
    }
}

/// Trimmed body, cut to [`BODY_SNIPPET_CHARS`] characters with "..." when longer
pub fn body_snippet(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.chars().count() > BODY_SNIPPET_CHARS {
        let cut: String = trimmed.chars().take(BODY_SNIPPET_CHARS).collect();
        Some(format!("{}...", cut))
    } else {
        Some(trimmed.to_string())
    }
}
