//! CLI entrypoint for `cligen`.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cligen::cli::Args;
use cligen::error::CligenError;
use cligen::generator::Generator;
use cligen::output::GeneratedFiles;

const LOG_ENV: &str = "CLIGEN_LOG";
const DEFAULT_FILTER: &str = "cligen=warn";

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(report) => {
            report_success(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<GeneratedFiles, CligenError> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // `--usage` and `--version` exit successfully through clap.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => return Err(CligenError::Usage(err.render().to_string())),
    };
    let config = args.into_config()?;
    Generator::new(config).generate()
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[expect(clippy::print_stdout, reason = "the success line is the tool's output")]
fn report_success(report: &GeneratedFiles) {
    println!("Generated CLI code in {}", report.front_end);
}

#[expect(clippy::print_stderr, reason = "errors are reported on stderr")]
fn report_failure(err: &CligenError) {
    eprintln!("cligen: {err}");
}
