//! tgbind Code Generator
//!
//! Generates Telegram Bot API client bindings from the published schema.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tgbind_define::{DEFAULT_SCHEMA_URL, SchemaSource};
use tgbind_gen::cargo_gen::{DEFAULT_PACKAGE_NAME, write_cargo_toml};
use tgbind_gen::errors::GeneratorError;
use tgbind_gen::output::{generate_and_write, write_records};
use tgbind_gen::resolve::compile;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// What the generator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// A Rust crate (`src/*.rs` plus `Cargo.toml` one level up)
    Rust,
    /// The binding records as pretty JSON (`bindings.json`)
    Records,
}

/// tgbind - generates typed Bot API client bindings from the schema document
#[derive(Parser, Debug)]
#[command(name = "tgbind")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema document to read: an http(s) URL or a local path
    #[arg(short, long, default_value = DEFAULT_SCHEMA_URL)]
    source: String,

    /// Output directory (the crate's src/ for Rust output)
    #[arg(short, long, default_value = "bindings/src")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Rust)]
    format: OutputFormat,

    /// Print generated output without writing files
    #[arg(long)]
    dry_run: bool,

    /// Fail when the schema cannot be loaded instead of generating empty output
    #[arg(long)]
    strict: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,tgbind_gen=info,tgbind_define=info".to_string(),
            2 => "info,tgbind_gen=debug,tgbind_define=debug".to_string(),
            _ => "debug,tgbind_gen=trace,tgbind_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    let source = SchemaSource::parse(&cli.source);
    tracing::info!(
        source = %source,
        format = ?cli.format,
        dry_run = cli.dry_run,
        "Starting generation"
    );

    let doc = match source.load().await {
        Ok(doc) => Some(doc),
        Err(e) if cli.strict => return Err(e.into()),
        Err(e) => {
            tracing::warn!("Schema unavailable ({}); generating empty bindings", e);
            None
        }
    };

    let bindings = compile(doc.as_ref())?;
    tracing::info!(
        types = bindings.types.len(),
        methods = bindings.methods.len(),
        "Compiled bindings"
    );

    match cli.format {
        OutputFormat::Rust => {
            generate_and_write(&bindings, &cli.output, cli.dry_run)?;

            // The output directory is the crate's src/; the manifest goes one level up
            let crate_dir = cli.output.parent().unwrap_or(Path::new("bindings"));
            write_cargo_toml(crate_dir, DEFAULT_PACKAGE_NAME, cli.dry_run)?;
        }
        OutputFormat::Records => {
            write_records(&bindings, &cli.output.join("bindings.json"), cli.dry_run)?;
        }
    }

    Ok(())
}
