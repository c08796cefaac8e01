use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Error};
use chrono::{Local, NaiveDate};
use structopt::StructOpt;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use split_fare::analyze::analyze_files;
use split_fare::assembler::{AssemblerConfig, assemble_journey};
use split_fare::codec;
use split_fare::domain::ClockTime;
use split_fare::optimizer::optimize;
use split_fare::provider::{
    ClientConfig, FixtureProvider, HttpSearchClient, JourneySearchProvider, TrainRunSource,
};
use split_fare::report::SavingsReport;

#[derive(StructOpt)]
#[structopt(
    name = "split-fare",
    about = "Find cheaper split-ticket combinations for a train journey."
)]
struct Options {
    /// Also append log output to this file
    #[structopt(long, global = true, parse(from_os_str))]
    log_file: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Collect fares for every segment of a journey and save them
    Assemble(AssembleOptions),
    /// Find the cheapest ticket combination in saved price files
    Analyze(AnalyzeOptions),
}

#[derive(StructOpt)]
struct AssembleOptions {
    /// Start station, e.g. "Berlin Gesundbrunnen"
    origin: String,

    /// Destination station, e.g. "Bamberg"
    destination: String,

    /// Departure date as DD.MM.YYYY (default: today)
    #[structopt(short, long, parse(try_from_str = parse_date))]
    date: Option<NaiveDate>,

    /// Departure time as HH:MM
    #[structopt(short, long, default_value = "10:00", parse(try_from_str = ClockTime::parse_hhmm))]
    time: ClockTime,

    /// Output file (default: data/<origin>_to_<destination>_<timestamp>.tsv)
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Base URL of the journey search API
    #[structopt(long, env = "SPLIT_FARE_ENDPOINT", required_unless = "fixture")]
    endpoint: Option<String>,

    /// API key sent with every search
    #[structopt(long, env = "SPLIT_FARE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Serve searches from a JSON fixture instead of the API
    #[structopt(long, parse(from_os_str), conflicts_with = "endpoint")]
    fixture: Option<PathBuf>,

    /// Search results inspected per segment
    #[structopt(long, default_value = "5")]
    max_candidates: usize,

    /// Segments searched concurrently
    #[structopt(long, default_value = "4")]
    batch_size: usize,

    /// Per-request timeout in seconds
    #[structopt(long, default_value = "20")]
    timeout: u64,
}

#[derive(StructOpt)]
struct AnalyzeOptions {
    /// Price matrix files to analyze
    #[structopt(required = true, parse(from_os_str))]
    files: Vec<PathBuf>,
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%d.%m.%Y")
}

fn init_logger(log_file: Option<&Path>) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .with(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let options = Options::from_args();
    if let Err(err) = init_logger(options.log_file.as_deref()) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    let result = match options.command {
        Command::Assemble(options) => assemble(options).await,
        Command::Analyze(options) => Ok(analyze(&options)),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every file produced a report.
fn analyze(options: &AnalyzeOptions) -> bool {
    let mut all_ok = true;
    for (path, result) in analyze_files(&options.files) {
        println!("{}", "=".repeat(80));
        println!("Analyzing: {}", path.display());
        println!("{}", "=".repeat(80));
        match result {
            Ok(report) => println!("{report}"),
            Err(e) => {
                println!("Error processing {}: {e}\n", path.display());
                all_ok = false;
            }
        }
    }
    all_ok
}

async fn assemble(options: AssembleOptions) -> Result<bool, Error> {
    let date = options.date.unwrap_or_else(|| Local::now().date_naive());
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output(&options.origin, &options.destination));
    let config = AssemblerConfig::new(options.max_candidates, options.batch_size);

    info!(
        origin = %options.origin,
        destination = %options.destination,
        date = %date.format("%d.%m.%Y"),
        time = %options.time,
        output = %output.display(),
        "Starting assembly"
    );

    if let Some(fixture) = &options.fixture {
        let provider = FixtureProvider::load(fixture)?;
        run_assembly(&provider, &provider, &config, &options, date, &output).await
    } else {
        let endpoint = options
            .endpoint
            .as_deref()
            .context("either --endpoint or --fixture is required")?;
        let mut client_config = ClientConfig::new(endpoint)
            .with_max_concurrent(config.batch_size)
            .with_timeout(options.timeout);
        if let Some(key) = &options.api_key {
            client_config = client_config.with_api_key(key);
        }
        let client = HttpSearchClient::new(client_config)?;
        run_assembly(&client, &client, &config, &options, date, &output).await
    }
}

async fn run_assembly<S, P>(
    source: &S,
    provider: &P,
    config: &AssemblerConfig,
    options: &AssembleOptions,
    date: NaiveDate,
    output: &Path,
) -> Result<bool, Error>
where
    S: TrainRunSource,
    P: JourneySearchProvider,
{
    let assembly = assemble_journey(
        source,
        provider,
        config,
        &options.origin,
        &options.destination,
        options.time.on(date),
    )
    .await?;

    codec::write_file(output, &assembly.matrix)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        path = %output.display(),
        priced = assembly.stats.priced,
        unavailable = assembly.stats.unavailable(),
        "Saved price matrix"
    );

    match optimize(&assembly.matrix) {
        Ok(route) => {
            println!("{}", SavingsReport::new(&assembly.matrix, route));
            Ok(true)
        }
        Err(e) => {
            warn!(error = %e, "No ticket combination covers the journey");
            println!("No valid route found: {e}");
            Ok(false)
        }
    }
}

fn default_output(origin: &str, destination: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from("data").join(format!(
        "{}_to_{}_{}.tsv",
        file_safe(origin),
        file_safe(destination),
        timestamp
    ))
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_safe_replaces_non_word_characters() {
        assert_eq!(file_safe("Berlin Gesundbrunnen"), "Berlin_Gesundbrunnen");
        assert_eq!(file_safe("Halle (Saale) Hbf"), "Halle__Saale__Hbf");
        assert_eq!(file_safe("Frankfurt-Süd"), "Frankfurt-Süd");
        assert_eq!(file_safe("Nürnberg Hbf/Gleis 3"), "Nürnberg_Hbf_Gleis_3");
    }

    #[test]
    fn default_output_lives_under_data() {
        let path = default_output("Berlin Gesundbrunnen", "Bamberg");
        assert_eq!(path.parent(), Some(Path::new("data")));

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("Berlin_Gesundbrunnen_to_Bamberg_"));
        assert!(name.ends_with(".tsv"));
        // YYYYmmdd_HHMMSS
        let stamp = &name["Berlin_Gesundbrunnen_to_Bamberg_".len()..name.len() - 4];
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
    }
}
