#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! `oats`: generate TypeScript declarations from an OpenAPI document.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use indexmap::IndexMap;
use oats_core::{GenerateOptions, Source, generate, resolve_locator};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

mod config;
mod logging;

/// Command-line arguments of `oats`.
#[derive(Parser, Debug)]
#[command(
    name = "oats",
    version,
    about = "Generate TypeScript types from OpenAPI 3 documents"
)]
pub struct Cli {
    /// Path or URL of the root document; reads stdin when omitted or "-"
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Write the declarations here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to ./oats.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Allow arbitrary extra properties on every object schema
    #[arg(long)]
    pub additional_properties: bool,

    /// Sort object members by key
    #[arg(long)]
    pub alphabetize: bool,

    /// Treat members with a default value as required
    #[arg(long)]
    pub default_non_nullable: bool,

    /// Leave out deprecated schemas, members and operations
    #[arg(long)]
    pub exclude_deprecated: bool,

    /// Mark every member and array readonly
    #[arg(long)]
    pub immutable_types: bool,

    /// Encode minItems/maxItems as tuple types
    #[arg(long)]
    pub support_array_length: bool,

    /// Key templated paths by template literal types
    #[arg(long)]
    pub path_params_as_types: bool,

    /// Export type aliases instead of interfaces
    #[arg(long)]
    pub export_type: bool,

    /// Authorization header value for remote documents
    #[arg(long, value_name = "TOKEN")]
    pub auth: Option<String>,

    /// Extra request header for remote documents (repeatable)
    #[arg(long = "header", value_name = "NAME: VALUE", value_parser = config::parse_header)]
    pub headers: Vec<(String, Value)>,

    /// Extra request headers as a JSON object
    #[arg(long, value_name = "JSON", value_parser = config::parse_headers_object)]
    pub headers_object: Option<IndexMap<String, Value>>,

    /// Request method for remote documents
    #[arg(long, value_name = "METHOD")]
    pub http_method: Option<String>,

    /// Log debug output unless OATS_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    logging::init_tracing(cli.verbose);

    let options = match config::resolve_options(&cli) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    debug!(?options, "Resolved options.");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            return 1;
        }
    };

    match runtime.block_on(generate_to(&cli, &options)) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

async fn generate_to(cli: &Cli, options: &GenerateOptions) -> Result<(), String> {
    let started = Instant::now();
    let (source, label) = match cli.input.as_deref() {
        None | Some("-") => (Source::Stream(Box::new(tokio::io::stdin())), "stdin".to_string()),
        Some(locator) => {
            let url = resolve_locator(locator).map_err(|err| err.to_string())?;
            (Source::Url(url), locator.to_string())
        }
    };

    let declarations = generate(source, options)
        .await
        .map_err(|err| err.to_string())?;

    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|err| format!("Failed to create {}: {err}", parent.display()))?;
            }
            tokio::fs::write(path, &declarations)
                .await
                .map_err(|err| format!("Failed to write {}: {err}", path.display()))?;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            info!(input = %label, output = %path.display(), elapsed_ms, "Wrote declarations.");
            eprintln!("🚀 {label} → {} [{elapsed_ms}ms]", path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(declarations.as_bytes())
                .await
                .map_err(|err| format!("Failed to write to stdout: {err}"))?;
            stdout
                .flush()
                .await
                .map_err(|err| format!("Failed to write to stdout: {err}"))?;
        }
    }
    Ok(())
}
