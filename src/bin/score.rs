//! JSON scoring filter.
//!
//! Reads one scoring request (a JSON object of feature names to numbers)
//! and writes the scoring response to stdout:
//!
//! ```bash
//! echo '{"CREDIT_SCORE_AVG_CALC": 610}' | cargo run --bin score -- --pretty
//! cargo run --bin score -- --input application.json
//! cargo run --bin score -- --catalog
//! ```
//!
//! Exit codes: 0 scored, 2 usage error, 3 validation error, 4 I/O error or
//! malformed JSON. Logs go to stderr so stdout stays pure JSON.

use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lendscore::adapters::sanitize::SanitizingMakeWriter;
use lendscore::adapters::threshold::ThresholdModel;
use lendscore::adapters::wire::{self, ErrorResponse, ScoreRequest, ScoreResponse};
use lendscore::application::ScoringService;
use lendscore::LendscoreError;

const USAGE: &str = "Usage: score [--input <path>] [--pretty] [--catalog]";

const EXIT_USAGE: i32 = 2;
const EXIT_VALIDATION: i32 = 3;
const EXIT_MALFORMED: i32 = 4;

struct Options {
    input: Option<PathBuf>,
    pretty: bool,
    catalog: bool,
}

fn parse_args() -> Options {
    let mut args = std::env::args().skip(1);
    let mut options = Options {
        input: None,
        pretty: false,
        catalog: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" | "-i" => {
                let p = args.next().unwrap_or_default();
                if p.is_empty() {
                    eprintln!("{USAGE}");
                    std::process::exit(EXIT_USAGE);
                }
                options.input = Some(PathBuf::from(p));
            }
            "--pretty" => options.pretty = true,
            "--catalog" => options.catalog = true,
            "-h" | "--help" => {
                println!(
                    "{USAGE}\n\nReads a JSON object of feature names to numbers from <path> or stdin and prints the risk assessment. Missing features take their defaults. --catalog prints the feature catalog instead."
                );
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown arg: {arg}\n{USAGE}");
                std::process::exit(EXIT_USAGE);
            }
        }
    }

    options
}

fn score_request(
    service: &ScoringService<ThresholdModel>,
    input: Option<&PathBuf>,
) -> lendscore::Result<ScoreResponse> {
    let request = match input {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Reading request");
            ScoreRequest::from_reader(File::open(path)?)?
        }
        None => ScoreRequest::from_reader(std::io::stdin().lock())?,
    };
    let (_, result) = service.evaluate_raw(&request.features)?;
    Ok(ScoreResponse::from(&result))
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> lendscore::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(SanitizingMakeWriter::new(std::io::stderr))
                .with_ansi(false),
        )
        .init();

    let options = parse_args();

    if options.catalog {
        return Ok(emit(&wire::catalog(), options.pretty)?);
    }

    let service = ScoringService::new(ThresholdModel::new());
    match score_request(&service, options.input.as_ref()) {
        Ok(response) => Ok(emit(&response, options.pretty)?),
        Err(LendscoreError::Validation(e)) => {
            emit(&ErrorResponse::from(&e), options.pretty)?;
            std::process::exit(EXIT_VALIDATION);
        }
        Err(e @ (LendscoreError::Io(_) | LendscoreError::Serialization(_))) => {
            tracing::warn!("Malformed request: {e}");
            emit(&ErrorResponse::malformed(e.to_string()), options.pretty)?;
            std::process::exit(EXIT_MALFORMED);
        }
    }
}
