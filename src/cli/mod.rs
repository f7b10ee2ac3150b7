//! CLI command handling
//!
//! Wires configuration, the catalog, the runner and the reporter together.

use std::io;
use std::process::ExitCode;

use crate::commands::RunArgs;
use crate::common::config::RunConfig;
use crate::common::{paths, Result};
use crate::http::HttpClient;
use crate::report::Reporter;
use crate::runner::{parse_only, select, sort_scenarios, Runner};
use crate::scenario::{builtin_catalog, load_scenario_file, validate_catalog, PayloadSet, Scenario};

/// Run the checker with parsed arguments
///
/// Configuration problems come back as `Err` before any request is sent.
/// Scenario failures are not errors; they only turn the exit code to 1.
pub async fn dispatch(args: RunArgs) -> Result<ExitCode> {
    let config = RunConfig::load(args.config.as_deref())?;
    let base_url = config.resolve_base_url(&args.base_url);
    let catalog = load_catalog(&args)?;

    if args.list {
        Reporter::new(io::stdout().lock(), args.format, !args.no_color).list(&catalog)?;
        return Ok(ExitCode::SUCCESS);
    }

    let only = args.only.as_deref().map(parse_only).unwrap_or_default();
    let mut scenarios = select(catalog, &only)?;
    sort_scenarios(&mut scenarios);

    tracing::info!(%base_url, timeout = args.timeout, "target configured");
    let client = HttpClient::new(&base_url, &config, args.timeout)?;
    let report = Runner::new(client, args.verbose).run(&scenarios).await;

    Reporter::new(io::stdout().lock(), args.format, !args.no_color).report(&report)?;

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Built-in catalog plus any `--scenarios` file, validated
fn load_catalog(args: &RunArgs) -> Result<Vec<Scenario>> {
    let payload_dir = args
        .payload_dir
        .clone()
        .unwrap_or_else(paths::default_payload_dir);
    let payload_dir = std::path::absolute(&payload_dir).unwrap_or(payload_dir);

    let mut catalog = builtin_catalog(&PayloadSet::new(&payload_dir));
    if let Some(path) = &args.scenarios {
        catalog.extend(load_scenario_file(path)?);
    }

    validate_catalog(&catalog)?;
    Ok(catalog)
}
