use std::path::PathBuf;

/// Configuration of the HTTP monitoring client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the server's monitoring port, e.g. `http://127.0.0.1:8222`.
    pub api_url: String,
    /// Number of retries for transient request failures.
    pub retries: u32,
    /// Optional TLS setup for an HTTPS monitoring port.
    pub tls: Option<TlsConfig>,
}

impl Default for HttpClientConfig {
    fn default() -> HttpClientConfig {
        HttpClientConfig {
            api_url: "http://127.0.0.1:8222".to_string(),
            retries: 3,
            tls: None,
        }
    }
}

/// TLS material for the HTTPS monitoring port. All files are PEM-encoded.
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    /// Root certificate used to verify the server, in addition to the
    /// built-in roots.
    pub ca_file: Option<PathBuf>,
    /// Client certificate presented to the server.
    pub cert_file: Option<PathBuf>,
    /// Private key matching `cert_file`.
    pub key_file: Option<PathBuf>,
    /// Skip server certificate verification entirely.
    pub accept_invalid_certs: bool,
}
