//! Logging setup for realty services.
//!
//! Events go through `tracing`, rendered either human-readable or as one
//! JSON object per line. HTTP plumbing crates are capped at `warn` so the
//! valuation events stay visible at `info`.

use std::str::FromStr;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Header carrying a caller-supplied trace ID.
pub const TRACE_HEADER: &str = "X-Trace-Id";

/// Library targets always capped at `warn`.
pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "h2", "tokio_util", "tower_http"];

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub const NAMES: [&'static str; 2] = ["pretty", "json"];
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// `EnvFilter` directives for `level` plus a `warn` cap on every quiet target.
fn filter_directives(level: &str, extra_quiet: &[String]) -> String {
    NOISY_MODULES
        .iter()
        .copied()
        .chain(extra_quiet.iter().map(String::as_str))
        .fold(level.to_string(), |mut acc, target| {
            acc.push(',');
            acc.push_str(target);
            acc.push_str("=warn");
            acc
        })
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. An unknown `format` falls back to
/// pretty output. Calling this twice is harmless; the second call is a no-op.
pub fn init_logging(level: &str, format: &str, extra_quiet: &[String]) {
    let directives = filter_directives(level, extra_quiet);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));
    let format = format.parse().unwrap_or(LogFormat::Pretty);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(
            level = %level,
            format = ?format,
            quiet_targets = NOISY_MODULES.len() + extra_quiet.len(),
            "Logging initialized"
        );
    }
}

/// Install the global subscriber from the `observability` config section.
pub fn init_from_config(config: &ObservabilityConfig) {
    init_logging(
        &config.log_level,
        &config.log_format,
        &config.excluded_targets,
    );
}

// ============================================================================
// Request Context
// ============================================================================

/// Identity of one HTTP request in the logs.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub trace_id: String,
    pub service: &'static str,
}

impl RequestContext {
    /// Fresh context with a random trace ID.
    pub fn new(service: &'static str) -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
            service,
        }
    }

    /// Reuse the caller's trace ID when the request carries a usable one.
    pub fn from_headers(headers: &http::HeaderMap, service: &'static str) -> Self {
        match headers
            .get(TRACE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            Some(trace_id) => Self {
                trace_id: trace_id.to_string(),
                service,
            },
            None => Self::new(service),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        let directives = filter_directives("debug", &["realty_valuation::market".to_string()]);
        assert!(directives.starts_with("debug,hyper=warn"));
        assert!(directives.contains(",tower_http=warn"));
        assert!(directives.ends_with(",realty_valuation::market=warn"));
    }

    #[test]
    fn test_log_format_parse() {
        let cases = vec![
            ("pretty", Some(LogFormat::Pretty)),
            ("JSON", Some(LogFormat::Json)),
            ("xml", None),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<LogFormat>().ok(), expected, "{input}");
        }
    }

    #[test]
    fn test_request_context_from_headers() {
        let mut headers = http::HeaderMap::new();
        headers.insert(TRACE_HEADER, "trace-123".parse().unwrap());

        let ctx = RequestContext::from_headers(&headers, "realty-valuation");
        assert_eq!(ctx.trace_id, "trace-123");
        assert_eq!(ctx.service, "realty-valuation");
    }

    #[test]
    fn test_request_context_generates_trace_id() {
        let mut headers = http::HeaderMap::new();
        headers.insert(TRACE_HEADER, "  ".parse().unwrap());

        let ctx = RequestContext::from_headers(&headers, "realty-valuation");
        assert_eq!(ctx.trace_id.len(), 36);
        assert_ne!(ctx.trace_id, RequestContext::new("realty-valuation").trace_id);
    }
}
