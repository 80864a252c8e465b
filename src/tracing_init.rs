use std::env;
use std::io::IsTerminal;

const EVENT_FILTER_ENV_VAR: &str = "RUST_LOG";

/// Default event filter: warnings from this crate, or debug with `--verbose`.
pub fn event_filter(verbose: bool, env_filter: Option<String>) -> String {
    match env_filter {
        Some(filter) if !filter.is_empty() => filter,
        _ => {
            let level = if verbose { "debug" } else { "warn" };
            format!("r2_purge={level}")
        }
    }
}

/// Diagnostics go to stderr so the report on stdout stays readable.
pub fn init_tracing(verbose: bool) {
    let filter = event_filter(verbose, env::var(EVENT_FILTER_ENV_VAR).ok());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .init();
}
