use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,sqlx=warn";

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info,sqlx=warn`
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// Same filter rules as [`init_logging_default`].
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the output format from `LOG_FORMAT` (`json` or anything else for compact).
pub fn init_logging_from_env() {
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}
