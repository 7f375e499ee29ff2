use shared::config::{FeatureFlags, PublicConfig};

use super::api::{ApiClient, ClientError};

/// Reads the public configuration the backend was started with.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    api: ApiClient,
}

impl ConfigService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch(&self) -> Result<PublicConfig, ClientError> {
        self.api.get("/config").await
    }

    pub async fn fetch_features(&self) -> Result<FeatureFlags, ClientError> {
        self.api.get("/config/features").await
    }
}
