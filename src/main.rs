//! Security checker - runs a fixed catalog of adversarial HTTP requests
//! against a web application and reports pass/fail per scenario.

use clap::Parser;
use seccheck::commands::RunArgs;
use seccheck::common::logging;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "seccheck", about = "Security checker for web applications")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: RunArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_cli(cli.args.verbose);
    if cli.args.no_color {
        colored::control::set_override(false);
    }

    match seccheck::cli::dispatch(cli.args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
