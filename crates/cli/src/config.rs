//! `oats.toml` loading and command-line overrides.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use oats_core::GenerateOptions;
use serde_json::Value;
use tracing::debug;

use crate::Cli;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "oats.toml";

/// Options from the config file with the command line applied on top.
pub fn resolve_options(cli: &Cli) -> Result<GenerateOptions, String> {
    let mut options = match &cli.config {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => load_config(&PathBuf::from(DEFAULT_CONFIG))?,
        None => GenerateOptions::default(),
    };
    apply_cli(cli, &mut options);
    Ok(options)
}

/// Read `GenerateOptions` from a TOML file.
pub fn load_config(path: &Path) -> Result<GenerateOptions, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read config {}: {err}", path.display()))?;
    let options = toml::from_str(&text)
        .map_err(|err| format!("Invalid config {}: {err}", path.display()))?;
    debug!(path = %path.display(), "Loaded config.");
    Ok(options)
}

/// Flags only switch options on; values replace what the file set.
fn apply_cli(cli: &Cli, options: &mut GenerateOptions) {
    options.additional_properties |= cli.additional_properties;
    options.alphabetize |= cli.alphabetize;
    options.default_non_nullable |= cli.default_non_nullable;
    options.exclude_deprecated |= cli.exclude_deprecated;
    options.immutable_types |= cli.immutable_types;
    options.support_array_length |= cli.support_array_length;
    options.path_params_as_types |= cli.path_params_as_types;
    options.export_type |= cli.export_type;
    if let Some(auth) = &cli.auth {
        options.auth = Some(auth.clone());
    }
    if let Some(method) = &cli.http_method {
        options.http_method = Some(method.clone());
    }
    if let Some(headers) = &cli.headers_object {
        options.http_headers.extend(headers.clone());
    }
    options.http_headers.extend(cli.headers.iter().cloned());
}

/// Parse `--header "Name: value"` (or `Name=value`).
pub fn parse_header(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once(':')
        .or_else(|| raw.split_once('='))
        .ok_or_else(|| format!("expected \"Name: value\", got \"{raw}\""))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in \"{raw}\""));
    }
    Ok((name.to_string(), Value::String(value.trim().to_string())))
}

/// Parse `--headers-object '{"Name": "value"}'`.
pub fn parse_headers_object(raw: &str) -> Result<IndexMap<String, Value>, String> {
    serde_json::from_str(raw).map_err(|err| format!("expected a JSON object of headers: {err}"))
}
