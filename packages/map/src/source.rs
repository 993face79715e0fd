//! Where the map configuration and feature data come from.

use async_trait::async_trait;
use geojson_show_features::FeatureSet;
use geojson_show_map_models::MapConfig;

use crate::SourceError;

/// Path of the map configuration document.
pub const MAP_CONFIG_PATH: &str = "map.json";

/// Path of the feature data document.
pub const FEATURES_PATH: &str = "features.geojson";

/// Provides the two documents the map bootstrap needs.
#[async_trait]
pub trait MapSource: Send + Sync {
    /// Retrieves the map configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the document cannot be retrieved or
    /// parsed.
    async fn map_config(&self) -> Result<MapConfig, SourceError>;

    /// Retrieves the feature data document.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the document cannot be retrieved or
    /// parsed.
    async fn features(&self) -> Result<FeatureSet, SourceError>;
}

/// Documents already held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    config: MapConfig,
    features: FeatureSet,
}

impl InMemorySource {
    /// Creates a source serving `config` and `features`.
    #[must_use]
    pub const fn new(config: MapConfig, features: FeatureSet) -> Self {
        Self { config, features }
    }
}

#[async_trait]
impl MapSource for InMemorySource {
    async fn map_config(&self) -> Result<MapConfig, SourceError> {
        Ok(self.config.clone())
    }

    async fn features(&self) -> Result<FeatureSet, SourceError> {
        Ok(self.features.clone())
    }
}

/// Documents fetched from a running server.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpSource {
    /// Creates a source fetching from `base_url` (e.g.
    /// `http://localhost:8080/`).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let mut base_url =
            reqwest::Url::parse(base_url).map_err(|e| SourceError::InvalidUrl {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, SourceError> {
        self.base_url
            .join(path)
            .map_err(|e| SourceError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                message: e.to_string(),
            })
    }

    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let url = self.url(path)?;
        log::debug!("Fetching {url}");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(body)
    }
}

#[async_trait]
impl MapSource for HttpSource {
    async fn map_config(&self) -> Result<MapConfig, SourceError> {
        let body = self.fetch(MAP_CONFIG_PATH).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn features(&self) -> Result<FeatureSet, SourceError> {
        let body = self.fetch(FEATURES_PATH).await?;
        Ok(FeatureSet::from_value(serde_json::from_str(&body)?)?)
    }
}
