//! Run orchestration
//!
//! Selects the scenarios to run, orders them for readability, then executes
//! them strictly one at a time. A scenario that cannot reach the target is
//! recorded as a failure and the batch carries on.

mod evaluate;

pub use evaluate::{
    body_snippet, evaluate, status_match, Evaluation, BODY_SNIPPET_CHARS, TRANSPORT_FAILURE_STATUS,
};

use std::collections::HashSet;

use crate::common::{Error, Result};
use crate::http::Transport;
use crate::scenario::Scenario;

/// Recorded outcome of running one scenario once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub scenario: Scenario,
    pub passed: bool,
    /// HTTP status, or [`TRANSPORT_FAILURE_STATUS`]
    pub observed_status: i32,
    pub detail: String,
}

/// Pass/fail history of one category during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTally {
    pub category: String,
    pub outcomes: Vec<bool>,
}

impl CategoryTally {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|ok| **ok).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

/// Everything a run produced, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub results: Vec<ExecutionResult>,
    /// Categories in the order they were first seen
    pub categories: Vec<CategoryTally>,
}

impl RunReport {
    fn record(&mut self, result: ExecutionResult) {
        match self
            .categories
            .iter_mut()
            .find(|tally| tally.category == result.scenario.category)
        {
            Some(tally) => tally.outcomes.push(result.passed),
            None => self.categories.push(CategoryTally {
                category: result.scenario.category.clone(),
                outcomes: vec![result.passed],
            }),
        }
        self.results.push(result);
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Overall success: every executed scenario passed
    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

/// Split a `--only` value into scenario names, dropping blanks
pub fn parse_only(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep only the named scenarios
///
/// An empty `only` list selects everything. A non-empty list that matches
/// nothing is a configuration error.
pub fn select(catalog: Vec<Scenario>, only: &[String]) -> Result<Vec<Scenario>> {
    if only.is_empty() {
        return Ok(catalog);
    }

    let wanted: HashSet<&str> = only.iter().map(String::as_str).collect();
    let selected: Vec<Scenario> = catalog
        .into_iter()
        .filter(|scenario| wanted.contains(scenario.name.as_str()))
        .collect();

    if selected.is_empty() {
        return Err(Error::NoScenariosMatched(only.join(", ")));
    }
    Ok(selected)
}

/// Order by severity rank, then category, then name
pub fn sort_scenarios(scenarios: &mut [Scenario]) {
    scenarios.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Executes scenarios against a transport
pub struct Runner<T: Transport> {
    transport: T,
    verbose: bool,
}

impl<T: Transport> Runner<T> {
    pub fn new(transport: T, verbose: bool) -> Self {
        Self { transport, verbose }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one scenario: send, then evaluate
    pub async fn run_one(&self, scenario: &Scenario) -> ExecutionResult {
        let outcome = self.transport.send(scenario).await;

        if let Err(e) = &outcome {
            if e.is_transport() {
                tracing::warn!(scenario = %scenario.name, error = %e, "request failed");
            } else {
                tracing::error!(scenario = %scenario.name, error = %e, "unexpected error");
            }
        }

        let evaluation = evaluate(&outcome, scenario, self.verbose);
        tracing::debug!(
            scenario = %scenario.name,
            passed = evaluation.passed,
            status = evaluation.observed_status,
            "scenario evaluated"
        );

        ExecutionResult {
            scenario: scenario.clone(),
            passed: evaluation.passed,
            observed_status: evaluation.observed_status,
            detail: evaluation.detail,
        }
    }

    /// Run every scenario in order, one request in flight at a time
    pub async fn run(&self, scenarios: &[Scenario]) -> RunReport {
        tracing::info!(count = scenarios.len(), "running security checks");

        let mut report = RunReport::default();
        for scenario in scenarios {
            let result = self.run_one(scenario).await;
            report.record(result);
        }

        tracing::info!(passed = report.passed(), total = report.total(), "run finished");
        report
    }
}
