//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! sensitive data (like the Google AI API key) from leaking into logs.

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Sanitizes sensitive information from log messages.
///
/// Scans strings for Google AI API key patterns (`AIza…` tokens and `key=`
/// query parameters) and replaces them with a `[REDACTED]` placeholder so
/// upstream URLs and error bodies can be logged safely.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    // Pattern 1: Google API keys. These start with "AIza" and run until a
    // delimiter or the end of the string.
    if let Some(pos) = result.find("AIza") {
        let start = pos;
        let end = result[start..]
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == '&')
            .map(|i| start + i)
            .unwrap_or(result.len());
        result.replace_range(start..end, "[REDACTED_API_KEY]");
    }

    // Pattern 2: key= query parameters, whatever the key format.
    if let Some(pos) = result.find("key=") {
        let start = pos + "key=".len();
        let end = result[start..]
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == '&')
            .map(|i| start + i)
            .unwrap_or(result.len());
        result.replace_range(start..end, "[REDACTED_API_KEY]");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_api_key_token() {
        let input = "request failed for AIzaSyD4fakefakefakefakefake status 400";
        let output = sanitize(input);
        assert!(output.contains("[REDACTED_API_KEY]"));
        assert!(!output.contains("AIzaSyD4"));
    }

    #[test]
    fn test_sanitize_key_query_param() {
        let input = "POST /models/gemini-1.5-flash:generateContent?key=secret123&alt=json";
        let output = sanitize(input);
        assert!(output.contains("key=[REDACTED_API_KEY]"));
        assert!(!output.contains("secret123"));
        assert!(output.contains("&alt=json"));
    }

    #[test]
    fn test_sanitize_leaves_clean_input_alone() {
        let input = "nothing sensitive here";
        assert_eq!(sanitize(input), input);
    }
}
