use log::debug;
use reqwest::blocking::Client;
use reqwest::Proxy;
use std::time::Duration;

use super::{DocumentFetcher, FetchError};
use crate::common::PipelineConfig;

/// Create a blocking HTTP client with a fixed user agent, optionally routed
/// through a proxy
pub fn create_client(user_agent: &str, timeout: Duration, proxy: Option<&str>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(user_agent).timeout(timeout);
    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy)?);
    }
    builder.build()
}

/// Fetches pages over HTTP(S), one request at a time
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &PipelineConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: create_client(&config.user_agent, config.request_timeout, None)?,
        })
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let transport = |source| FetchError::Transport { url: url.to_string(), source };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(transport)
    }
}
