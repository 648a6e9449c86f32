//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! sensitive data (like the Venice API key) from leaking into logs.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{ProxyError, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Lazily initialized bearer token pattern
static BEARER_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_bearer_regex() -> &'static Regex {
    BEARER_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(bearer\s+)[A-Za-z0-9._~+/=-]+").expect("Invalid regex pattern")
    })
}

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line output.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ProxyError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init(),
    };

    result.map_err(|e| ProxyError::Internal(format!("Failed to install log subscriber: {}", e)))
}

/// Replaces bearer credentials in `input` with `[REDACTED]`.
///
/// Venice error bodies sometimes echo request headers back; everything
/// logged from an upstream response goes through here first.
pub fn sanitize(input: &str) -> String {
    get_bearer_regex()
        .replace_all(input, "${1}[REDACTED]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_bearer_token() {
        let input = "Authorization: Bearer vk_9f8e7d6c5b4a";
        let output = sanitize(input);
        assert_eq!(output, "Authorization: Bearer [REDACTED]");
    }

    #[test]
    fn test_sanitize_is_case_insensitive() {
        let output = sanitize(r#"{"auth":"bearer abc.def-ghi"}"#);
        assert!(output.contains("bearer [REDACTED]"));
        assert!(!output.contains("abc.def-ghi"));
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        let input = "Insufficient balance";
        assert_eq!(sanitize(input), input);
    }
}
