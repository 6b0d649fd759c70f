use crate::layers::client::RiskClassifier;
use crate::layers::domain::errors::DashboardError;
use crate::layers::domain::presenter::{classify, RiskVerdict};
use crate::layers::domain::stats::{StatsController, StatsRefresh};
use crate::layers::domain::view::{ResultBanner, SharedView};
use protocol::{PredictRequest, PredictResponse};
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub(crate) const VALIDATION_MESSAGE: &str = "Please enter both Entity and Comment";

#[derive(Clone)]
pub(crate) struct PredictionController {
    classifier: Arc<dyn RiskClassifier>,
    stats: StatsController,
    view: SharedView,
}

/// A validated submission whose loading banner is already showing.
pub(crate) struct PendingPrediction {
    id: Uuid,
    request: PredictRequest,
    classifier: Arc<dyn RiskClassifier>,
    stats: StatsController,
    view: SharedView,
}

pub(crate) struct PredictionReport {
    pub(crate) verdict: RiskVerdict,
    /// The stats refresh this prediction triggered. Dropping it does not
    /// cancel the refresh.
    pub(crate) refresh: JoinHandle<StatsRefresh>,
}

impl PredictionController {
    pub(crate) fn new(
        classifier: Arc<dyn RiskClassifier>,
        stats: StatsController,
        view: SharedView,
    ) -> Self {
        Self {
            classifier,
            stats,
            view,
        }
    }

    pub(crate) fn stats(&self) -> &StatsController {
        &self.stats
    }

    /// Validates input and switches the result region to the loading banner
    /// before returning. No network call happens here.
    pub(crate) fn begin(
        &self,
        entity_raw: &str,
        comment_raw: &str,
    ) -> Result<PendingPrediction, DashboardError> {
        let brand = entity_raw.trim();
        let comment = comment_raw.trim();
        if brand.is_empty() || comment.is_empty() {
            return Err(DashboardError::Validation(VALIDATION_MESSAGE.to_string()));
        }

        self.view.lock().result.show(ResultBanner::Loading);

        let pending = PendingPrediction {
            id: Uuid::new_v4(),
            request: PredictRequest {
                brand: brand.to_string(),
                comment: comment.to_string(),
            },
            classifier: Arc::clone(&self.classifier),
            stats: self.stats.clone(),
            view: self.view.clone(),
        };
        tracing::info!(
            event = "prediction.submitted",
            id = %pending.id,
            brand = %pending.request.brand,
            comment_len = pending.request.comment.len(),
        );
        Ok(pending)
    }

    pub(crate) async fn submit_prediction(
        &self,
        entity_raw: &str,
        comment_raw: &str,
    ) -> Result<PredictionReport, DashboardError> {
        self.begin(entity_raw, comment_raw)?.run().await
    }
}

impl PendingPrediction {
    /// Awaits the classifier and renders whatever comes back. Every outcome
    /// is written to the result region before this returns; the error is
    /// handed back only for callers that want to log or exit on it.
    pub(crate) async fn run(self) -> Result<PredictionReport, DashboardError> {
        let brand = self.request.brand.as_str();
        let response = match self.classifier.classify(&self.request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(event = "prediction.failed", id = %self.id, brand, error = %err);
                self.view.lock().result.show(ResultBanner::ServerError);
                return Err(err);
            }
        };

        let Some(label) = response.as_ref().and_then(PredictResponse::label) else {
            tracing::warn!(event = "prediction.empty", id = %self.id, brand);
            self.view.lock().result.show(ResultBanner::PredictionFailed);
            return Err(DashboardError::MalformedResponse(
                "prediction response has no risk label".to_string(),
            ));
        };
        let verdict = classify(label);
        let confidence = response.as_ref().and_then(|response| response.confidence);

        let current = {
            let mut view = self.view.lock();
            view.result.show(ResultBanner::verdict(
                &verdict,
                brand,
                confidence,
            ));
            view.sync_selector(brand)
        };
        tracing::info!(
            event = "prediction.rendered",
            id = %self.id,
            brand,
            label,
            level = ?verdict.level,
        );

        let refresh = self.stats.spawn_refresh(current.unwrap_or_default());
        Ok(PredictionReport { verdict, refresh })
    }
}
