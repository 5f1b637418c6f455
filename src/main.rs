//! Numetrify - numerical methods from the command line
//!
//! Reads one JSON request and prints the JSON report.
//!
//! # Usage
//!
//! ```bash
//! numetrify request.json
//! echo '{"method": "secant", "function": "x^3 - x - 2", "x0": 1, "x1": 2}' | numetrify -
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use numetrify_core::{error::Result, NumetrifyError, Request};

/// Run a numerical method described by a JSON request
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON request, or `-` for stdin
    #[arg(value_name = "REQUEST_FILE", default_value = "-")]
    request_file: PathBuf,

    /// Pretty-print the report
    #[arg(short, long)]
    pretty: bool,

    /// Log every iteration
    #[arg(short, long)]
    verbose: bool,

    /// Log level
    #[arg(long, value_enum, env = "NUMETRIFY_LOG", default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Trace
    } else {
        args.log_level.into()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .filter_level(log_level)
        .init();

    let text = read_request(&args.request_file)?;
    let request = Request::from_json(&text)?;
    info!("numetrify v{}: {}", env!("CARGO_PKG_VERSION"), request.method());

    let report = request.run()?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}

fn read_request(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| NumetrifyError::FileReadError {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(text);
    }

    std::fs::read_to_string(path).map_err(|source| NumetrifyError::FileReadError {
        path: path.display().to_string(),
        source,
    })
}
