//! Sources of the known version list

#[cfg(test)]
use mockall::automock;

use std::time::Duration;

use reqwest::header::ACCEPT;
use tracing::{debug, warn};

use crate::config::{AppConfig, USER_AGENT};
use crate::versions::error::VersionListError;
use crate::versions::fetcher::parse_version_list;
use crate::versions::version::MendixVersion;

/// Trait for retrieving the list of known product versions
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionListSource: Send + Sync {
    /// Fetches all known versions
    ///
    /// # Returns
    /// * `Ok(Vec<MendixVersion>)` - Versions ordered from newest to oldest
    /// * `Err(VersionListError)` - If the fetch or parsing fails
    async fn fetch_versions(&self) -> Result<Vec<MendixVersion>, VersionListError>;
}

/// Plain-text version list served over HTTP(S)
pub struct HttpVersionList {
    client: reqwest::Client,
    url: String,
}

impl HttpVersionList {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, VersionListError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, VersionListError> {
        Self::new(
            &config.versions_url,
            Duration::from_millis(config.fetch_timeout_ms),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl VersionListSource for HttpVersionList {
    async fn fetch_versions(&self) -> Result<Vec<MendixVersion>, VersionListError> {
        debug!("Fetching version list from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "text/plain")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Version list returned status {}: {}", status, self.url);
            return Err(VersionListError::HttpStatus(status));
        }

        let body = response.text().await?;
        parse_version_list(&body)
    }
}
