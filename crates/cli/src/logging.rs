use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Crates whose events are shown by default.
const CRATES: [&str; 2] = ["oats", "oats_core"];

/// Install the stderr subscriber.
///
/// `OATS_LOG` takes a plain level ("trace", "debug", "info", "warn", "error")
/// applied to the oats crates, or a full filter spec like
/// "oats_core=debug,reqwest=warn". Without it the level is `info`, or `debug`
/// with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let filter = filter_spec(std::env::var("OATS_LOG").ok().as_deref(), verbose);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(env: Option<&str>, verbose: bool) -> String {
    let per_crate = |level: &str| {
        CRATES
            .iter()
            .map(|krate| format!("{krate}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    };
    match env {
        Some(level) if is_plain_level(level) => per_crate(&level.to_ascii_lowercase()),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ if verbose => per_crate("debug"),
        _ => per_crate("info"),
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
