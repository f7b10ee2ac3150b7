//! Console tables

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::runner::RunReport;
use crate::scenario::Scenario;

const COLUMN_GAP: &str = "  ";

/// A plain-text table whose last column is left unpadded
struct Table {
    title: &'static str,
    headers: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

/// Cell text plus an optional colour applied after padding
struct Cell {
    text: String,
    color: Option<Color>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

impl Table {
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.text.width());
            }
        }
        widths
    }

    fn render(&self, use_color: bool) -> String {
        let widths = self.widths();
        let last = self.headers.len() - 1;
        let mut out = String::new();

        let title = if use_color {
            self.title.bold().to_string()
        } else {
            self.title.to_string()
        };
        out.push_str(&title);
        out.push('\n');

        let header_cells: Vec<Cell> = self.headers.iter().map(|h| Cell::plain(*h)).collect();
        out.push_str(&render_row(&header_cells, &widths, last, false));

        let rule: Vec<Cell> = widths.iter().map(|w| Cell::plain("-".repeat(*w))).collect();
        out.push_str(&render_row(&rule, &widths, last, false));

        for row in &self.rows {
            out.push_str(&render_row(row, &widths, last, use_color));
        }
        out
    }
}

fn render_row(cells: &[Cell], widths: &[usize], last: usize, use_color: bool) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let padding = if i == last {
            String::new()
        } else {
            " ".repeat(widths[i].saturating_sub(cell.text.width()))
        };
        match (use_color, cell.color) {
            (true, Some(color)) => line.push_str(&cell.text.color(color).to_string()),
            _ => line.push_str(&cell.text),
        }
        line.push_str(&padding);
        if i != last {
            line.push_str(COLUMN_GAP);
        }
    }
    line.trim_end().to_string() + "\n"
}

/// Render the per-scenario table, the category summary and the trailer
pub fn render(report: &RunReport, use_color: bool) -> String {
    let checks = Table {
        title: "Security Checks",
        headers: vec!["No.", "Scenario", "Category", "Severity", "Result", "Detail"],
        rows: report
            .results
            .iter()
            .enumerate()
            .map(|(idx, result)| {
                let verdict = if result.passed {
                    Cell::colored("PASS", Color::Green)
                } else {
                    Cell::colored("FAIL", Color::Red)
                };
                vec![
                    Cell::plain((idx + 1).to_string()),
                    Cell::plain(result.scenario.name.as_str()),
                    Cell::plain(result.scenario.category.as_str()),
                    Cell::plain(result.scenario.severity.as_str()),
                    verdict,
                    Cell::plain(result.detail.as_str()),
                ]
            })
            .collect(),
    };

    let summary = Table {
        title: "Category Summary",
        headers: vec!["Category", "Passed/Total", "Status"],
        rows: report
            .categories
            .iter()
            .map(|tally| {
                let status = if tally.all_passed() {
                    Cell::colored("OK", Color::Green)
                } else {
                    Cell::colored("Needs attention", Color::Yellow)
                };
                vec![
                    Cell::plain(tally.category.as_str()),
                    Cell::plain(format!("{}/{}", tally.passed(), tally.total())),
                    status,
                ]
            })
            .collect(),
    };

    format!(
        "{}\n{}\nPassed {}/{} checks\n",
        checks.render(use_color),
        summary.render(use_color),
        report.passed(),
        report.total()
    )
}

/// One `- name: description` line per scenario
pub fn render_list(scenarios: &[Scenario]) -> String {
    scenarios
        .iter()
        .map(|s| format!("- {}: {}\n", s.name, s.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{CategoryTally, ExecutionResult};
    use crate::scenario::{HttpMethod, Severity};

    fn result(name: &str, category: &str, passed: bool, detail: &str) -> ExecutionResult {
        ExecutionResult {
            scenario: Scenario::new(name, "desc", category, Severity::High, HttpMethod::Get, "/x")
                .expect(&[403]),
            passed,
            observed_status: if passed { 403 } else { 200 },
            detail: detail.to_string(),
        }
    }

    fn sample() -> RunReport {
        RunReport {
            results: vec![
                result(
                    "access_idor_download",
                    "Access Control",
                    true,
                    "GET /x; status 403; expected 403",
                ),
                result("csrf_missing_token", "CSRF", false, "GET /x; status 200; expected 403"),
            ],
            categories: vec![
                CategoryTally {
                    category: "Access Control".into(),
                    outcomes: vec![true],
                },
                CategoryTally {
                    category: "CSRF".into(),
                    outcomes: vec![false],
                },
            ],
        }
    }

    #[test]
    fn test_render_plain_tables() {
        let out = render(&sample(), false);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Security Checks");
        assert!(lines[1].starts_with("No.  Scenario"));
        assert!(lines[3].starts_with("1    access_idor_download  Access Control  High      PASS"));
        assert!(lines[3].ends_with("GET /x; status 403; expected 403"));
        assert!(lines[4].contains("FAIL"));

        assert!(out.contains("Access Control  1/1           OK"));
        assert!(out.contains("CSRF            0/1           Needs attention"));
        assert!(out.ends_with("Passed 1/2 checks\n"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_render_list() {
        let scenarios = vec![
            Scenario::new("a", "first check", "X", Severity::Low, HttpMethod::Get, "/"),
            Scenario::new("b", "second check", "X", Severity::Low, HttpMethod::Get, "/"),
        ];
        assert_eq!(render_list(&scenarios), "- a: first check\n- b: second check\n");
    }
}
