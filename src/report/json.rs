use serde::Serialize;

use crate::common::Result;
use crate::runner::RunReport;
use crate::scenario::{Scenario, Severity};

#[derive(Serialize)]
struct Report<'a> {
    summary: Summary,
    categories: Vec<CategoryEntry<'a>>,
    results: Vec<ResultEntry<'a>>,
}

#[derive(Serialize)]
struct Summary {
    passed: usize,
    total: usize,
    all_passed: bool,
}

#[derive(Serialize)]
struct CategoryEntry<'a> {
    category: &'a str,
    passed: usize,
    total: usize,
    status: &'static str,
}

#[derive(Serialize)]
struct ResultEntry<'a> {
    index: usize,
    name: &'a str,
    category: &'a str,
    severity: Severity,
    method: &'static str,
    path: &'a str,
    passed: bool,
    status: i32,
    detail: &'a str,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    description: &'a str,
    category: &'a str,
    severity: Severity,
}

pub fn render(report: &RunReport) -> Result<String> {
    let doc = Report {
        summary: Summary {
            passed: report.passed(),
            total: report.total(),
            all_passed: report.all_passed(),
        },
        categories: report
            .categories
            .iter()
            .map(|tally| CategoryEntry {
                category: &tally.category,
                passed: tally.passed(),
                total: tally.total(),
                status: if tally.all_passed() { "OK" } else { "Needs attention" },
            })
            .collect(),
        results: report
            .results
            .iter()
            .enumerate()
            .map(|(idx, result)| ResultEntry {
                index: idx + 1,
                name: &result.scenario.name,
                category: &result.scenario.category,
                severity: result.scenario.severity,
                method: result.scenario.method.as_str(),
                path: &result.scenario.path,
                passed: result.passed,
                status: result.observed_status,
                detail: &result.detail,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Catalog listing as a JSON array, in catalog order
pub fn render_list(scenarios: &[Scenario]) -> Result<String> {
    let entries: Vec<ListEntry<'_>> = scenarios
        .iter()
        .map(|scenario| ListEntry {
            name: &scenario.name,
            description: &scenario.description,
            category: &scenario.category,
            severity: scenario.severity,
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}
