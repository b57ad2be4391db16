use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the monitoring client.
///
/// Transport and decode failures are recovered at the poll-cycle boundary:
/// the cycle publishes a `Stats` carrying the error message and polling
/// continues. Configuration failures (URL, TLS material) surface before the
/// poller starts and are fatal.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("cannot parse URL")]
    CannotParseUrl,
    #[error("cannot read TLS file: {0}")]
    Io(#[from] std::io::Error),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("request middleware error: {0}")]
    RequestMiddleware(#[from] reqwest_middleware::Error),
    #[error("server returned {0}")]
    HttpStatus(StatusCode),
    #[error("cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
