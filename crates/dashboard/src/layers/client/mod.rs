pub(crate) mod http;

use crate::layers::domain::errors::DashboardError;
use async_trait::async_trait;
use protocol::{BrandStatsPayload, PredictRequest, PredictResponse};

pub(crate) use http::HttpBackend;

/// Remote sentiment classifier. `Ok(None)` means the call succeeded but the
/// body was empty (`null`).
#[async_trait]
pub(crate) trait RiskClassifier: Send + Sync {
    async fn classify(
        &self,
        request: &PredictRequest,
    ) -> Result<Option<PredictResponse>, DashboardError>;
}

/// Remote read API for per-entity sentiment counts.
#[async_trait]
pub(crate) trait StatsProvider: Send + Sync {
    async fn brand_stats(&self, entity: &str) -> Result<BrandStatsPayload, DashboardError>;
}
