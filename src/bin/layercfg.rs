// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line tool for inspecting layered configuration.
//!
//! ```bash
//! # Print the whole merged configuration
//! layercfg config -e staging -e production
//!
//! # Print a single value
//! layercfg config -e production database.pool.size
//!
//! # Take the overlays from LAYERCFG_ENV
//! LAYERCFG_ENV=production layercfg config --from-env database.host
//! ```

use clap::Parser;
use layercfg::adapters::EnvironmentResolver;
use layercfg::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Print merged JSON configuration from a base directory and its overlays.
#[derive(Debug, Parser)]
#[command(name = "layercfg", version)]
struct Cli {
    /// Base directory holding the `.json` fragments
    directory: PathBuf,

    /// Key path to print, e.g. `database.host` (default: everything)
    key_path: Option<String>,

    /// Environment overlay to apply; repeat to apply several, in order
    #[arg(short = 'e', long = "env")]
    environments: Vec<String>,

    /// Append the overlays named by an environment variable
    #[arg(long)]
    from_env: bool,

    /// Variable consulted by `--from-env`
    #[arg(long, default_value = layercfg::adapters::env_var::DEFAULT_ENV_VAR)]
    env_var: String,

    /// Print compact instead of pretty JSON
    #[arg(long)]
    compact: bool,
}

/// Exit code for a key path that resolves to nothing.
const EXIT_MISSING_KEY: u8 = 2;

/// What a successful run has to report.
#[derive(Debug, PartialEq, Eq)]
enum Output {
    /// JSON text to print on stdout
    Rendered(String),
    /// The requested key path holds no value
    MissingKey(String),
}

fn render(value: &serde_json::Value, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    // Serializing a `Value` cannot fail.
    rendered.unwrap_or_default()
}

fn run(cli: &Cli) -> Result<Output> {
    let mut builder = ConfigStore::builder()
        .with_directory(&cli.directory)
        .with_environments(&cli.environments);
    if cli.from_env {
        builder = builder.with_environment_resolver(&EnvironmentResolver::new().variable(&cli.env_var));
    }

    tracing::debug!("Applying environments [{}]", builder.environment());
    let store = builder.build()?;

    let value = match &cli.key_path {
        Some(path) => match store.get(&KeyPath::from(path.as_str())) {
            Some(value) => value.clone(),
            None => return Ok(Output::MissingKey(path.clone())),
        },
        None => serde_json::Value::Object(store.into_repository().into_iter().collect()),
    };

    Ok(Output::Rendered(render(&value, cli.compact)))
}

fn exit_code(result: &Result<Output>) -> u8 {
    match result {
        Ok(Output::Rendered(_)) => 0,
        Ok(Output::MissingKey(_)) => EXIT_MISSING_KEY,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = run(&Cli::parse());
    match &result {
        Ok(Output::Rendered(text)) => println!("{}", text),
        Ok(Output::MissingKey(path)) => eprintln!("layercfg: key path '{}' not found", path),
        Err(e) => eprintln!("layercfg: {}", e),
    }

    ExitCode::from(exit_code(&result))
}
