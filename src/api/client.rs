use crate::config::HttpSettings;
use crate::error::Result;

/// Shared HTTP client used for token requests and both backends
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(settings.timeout)                 // Unresponsive backend must not hang a scenario
            .connect_timeout(settings.connect_timeout)
            .user_agent(concat!("api-parity/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http_client })
    }

    /// Wrap an existing client, e.g. one configured by a test
    pub fn with_custom_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Underlying client (cheap clone)
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }
}
