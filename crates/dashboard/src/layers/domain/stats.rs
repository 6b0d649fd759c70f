use crate::layers::client::StatsProvider;
use crate::layers::domain::errors::DashboardError;
use crate::layers::domain::view::SharedView;
use protocol::{SentimentCategory, SentimentStats};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum StatsRefresh {
    /// Empty entity; nothing was fetched.
    Skipped,
    Rendered(SentimentStats),
    /// Fetched, but a chart canvas is missing from the view.
    Discarded(SentimentStats),
    /// Fetch failed; the error was logged and the old charts stay.
    Failed,
}

#[derive(Clone)]
pub(crate) struct StatsController {
    provider: Arc<dyn StatsProvider>,
    view: SharedView,
}

impl StatsController {
    pub(crate) fn new(provider: Arc<dyn StatsProvider>, view: SharedView) -> Self {
        Self { provider, view }
    }

    /// Fetches counts for `entity` and replaces both charts. Failures never
    /// leave this function.
    pub(crate) async fn refresh_stats(&self, entity: &str) -> StatsRefresh {
        let entity = entity.trim();
        if entity.is_empty() {
            return StatsRefresh::Skipped;
        }

        let payload = match self.provider.brand_stats(entity).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(event = "stats.refresh.failed", entity, error = %err);
                return StatsRefresh::Failed;
            }
        };
        let stats = SentimentStats::from_payload(&payload);

        let labels = SentimentCategory::ALL.map(SentimentCategory::label);
        let colors = SentimentCategory::ALL.map(SentimentCategory::color_rgb);
        let values = stats.values();
        let caption = format!("· {entity} ({} total)", stats.total());

        let mut view = self.view.lock();
        match view
            .charts
            .redraw(&values, &values, &labels, &colors, &caption)
        {
            Ok(()) => {
                tracing::info!(
                    event = "stats.refresh.rendered",
                    entity,
                    positive = stats.positive,
                    neutral = stats.neutral,
                    negative = stats.negative,
                    irrelevant = stats.irrelevant,
                );
                StatsRefresh::Rendered(stats)
            }
            Err(DashboardError::RenderPrecondition(reason)) => {
                tracing::debug!(event = "stats.refresh.discarded", entity, reason);
                StatsRefresh::Discarded(stats)
            }
            Err(err) => {
                tracing::warn!(event = "stats.refresh.failed", entity, error = %err);
                StatsRefresh::Failed
            }
        }
    }

    /// Fire-and-forget variant used after a prediction or a selector change.
    pub(crate) fn spawn_refresh(&self, entity: String) -> JoinHandle<StatsRefresh> {
        let controller = self.clone();
        tokio::spawn(async move { controller.refresh_stats(&entity).await })
    }
}
