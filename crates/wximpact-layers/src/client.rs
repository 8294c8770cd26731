//! HTTP client for the upstream feature service.
//!
//! Each impact layer lives at a numbered sublayer of one ArcGIS-style map
//! service. The only query this client issues is the valid-time lookup:
//! exactly one record, attributes only, no geometry.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use crate::error::LayerError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for a single feature service endpoint.
#[derive(Debug, Clone)]
pub struct FeatureClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct Attributes {
    valid_time: Option<String>,
}

impl FeatureClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, LayerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn new_with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the raw `valid_time` attribute for one sublayer.
    ///
    /// Queries with `where=1=1`, a record cap of one, and no geometry, so the
    /// response carries at most a single attribute record. Zero features or a
    /// null attribute indicate broken upstream data and map to
    /// [`LayerError::EmptyResult`] / [`LayerError::MissingAttribute`].
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_valid_time(&self, sublayer: u32) -> Result<String, LayerError> {
        let url = format!("{}/{}/query", self.base_url, sublayer);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("where", "1=1"),
                ("outFields", "valid_time"),
                ("resultRecordCount", "1"),
                ("returnGeometry", "false"),
                ("f", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LayerError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: QueryResponse = response.json().await?;

        body.features
            .into_iter()
            .next()
            .ok_or(LayerError::EmptyResult)?
            .attributes
            .valid_time
            .ok_or(LayerError::MissingAttribute)
    }
}
