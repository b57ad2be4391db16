use crate::error::MonitorError;
use crate::http::config::{HttpClientConfig, TlsConfig};
use reqwest::{Certificate, Identity, Response, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Serialize;

/// HTTP client for the monitoring endpoints: a parsed base URL plus a
/// retry-wrapped reqwest client. Only issues GET requests.
#[derive(Debug)]
pub struct HttpClient {
    pub api_url: Url,
    client: ClientWithMiddleware,
}

impl HttpClient {
    pub fn new(api_url: &str) -> Result<Self, MonitorError> {
        Self::create(HttpClientConfig {
            api_url: api_url.to_string(),
            ..Default::default()
        })
    }

    pub fn create(config: HttpClientConfig) -> Result<Self, MonitorError> {
        let api_url = Url::parse(&config.api_url).map_err(|_| MonitorError::CannotParseUrl)?;
        let inner = match &config.tls {
            Some(tls) => Self::build_tls_client(tls)?,
            None => reqwest::Client::new(),
        };
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { api_url, client })
    }

    fn build_tls_client(tls: &TlsConfig) -> Result<reqwest::Client, MonitorError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if tls.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(ca_file) = &tls.ca_file {
            let pem = std::fs::read(ca_file)?;
            builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
        }
        if let (Some(cert_file), Some(key_file)) = (&tls.cert_file, &tls.key_file) {
            let mut pem = std::fs::read(cert_file)?;
            pem.extend(std::fs::read(key_file)?);
            builder = builder.identity(Identity::from_pem(&pem)?);
        }
        Ok(builder.build()?)
    }

    pub async fn get(&self, path: &str) -> Result<Response, MonitorError> {
        let url = self.get_url(path)?;
        let response = self.client.get(url).send().await?;
        Self::ensure_success(response)
    }

    pub async fn get_with_query<T: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &T,
    ) -> Result<Response, MonitorError> {
        let url = self.get_url(path)?;
        let response = self.client.get(url).query(query).send().await?;
        Self::ensure_success(response)
    }

    pub fn get_url(&self, path: &str) -> Result<Url, MonitorError> {
        self.api_url.join(path).map_err(|_| MonitorError::CannotParseUrl)
    }

    fn ensure_success(response: Response) -> Result<Response, MonitorError> {
        if !response.status().is_success() {
            return Err(MonitorError::HttpStatus(response.status()));
        }
        Ok(response)
    }
}
