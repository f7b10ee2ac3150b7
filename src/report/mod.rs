//! Run reporting
//!
//! Purely presentational: the reporter never decides pass/fail.

mod json;
mod text;

use std::io::Write;

use crate::common::Result;
use crate::runner::RunReport;
use crate::scenario::Scenario;

/// Report format selected with `--format`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// Machine-readable JSON document
    Json,
}

/// Writes run results to an output stream
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
    use_color: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat, use_color: bool) -> Self {
        Self {
            out,
            format,
            use_color,
        }
    }

    /// Print the scenario catalog for `--list`
    pub fn list(&mut self, scenarios: &[Scenario]) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                self.out.write_all(text::render_list(scenarios).as_bytes())?;
            }
            OutputFormat::Json => {
                let rendered = json::render_list(scenarios)?;
                writeln!(self.out, "{}", rendered)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Print per-scenario results and the per-category summary
    pub fn report(&mut self, report: &RunReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                let rendered = text::render(report, self.use_color);
                self.out.write_all(rendered.as_bytes())?;
            }
            OutputFormat::Json => {
                let rendered = json::render(report)?;
                writeln!(self.out, "{}", rendered)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
