use crate::layers::domain::prediction::PredictionController;
use crate::layers::domain::stats::StatsRefresh;
use crate::layers::domain::view::SharedView;
use protocol::config::UiConfig;
use protocol::SentimentCategory;
use std::io::Write;

/// The configured selector plus the requested brand, so the refresh that
/// follows the prediction lands on it.
pub(crate) fn headless_ui_config(ui: &UiConfig, brand: &str) -> UiConfig {
    let mut ui = ui.clone();
    let brand = brand.trim();
    if !brand.is_empty() {
        ui.brands.push(brand.to_string());
    }
    ui.bar_chart = true;
    ui.pie_chart = true;
    ui
}

/// Runs one prediction and writes the banner and counts to `out`. Returns
/// false when the prediction itself failed.
pub(crate) async fn run_headless<W: Write>(
    controller: &PredictionController,
    view: &SharedView,
    brand: &str,
    comment: &str,
    out: &mut W,
) -> anyhow::Result<bool> {
    let outcome = controller.submit_prediction(brand, comment).await;
    if let Err(err) = outcome.as_ref() {
        if err.is_validation() {
            writeln!(out, "{err}")?;
            return Ok(false);
        }
    }

    let banner = view.lock().result.banner().cloned();
    if let Some(banner) = &banner {
        writeln!(out, "{}", banner.text())?;
        if let Some(confidence) = banner.confidence() {
            writeln!(out, "confidence {confidence:.2}%")?;
        }
    }

    let report = match outcome {
        Ok(report) => report,
        Err(err) => {
            tracing::debug!(event = "headless.prediction.failed", error = %err);
            return Ok(false);
        }
    };

    match report.refresh.await {
        Ok(StatsRefresh::Rendered(stats)) => {
            writeln!(out, "stats ({} total)", stats.total())?;
            for category in SentimentCategory::ALL {
                writeln!(out, "  {:<10} {}", category.label(), stats.count(category))?;
            }
        }
        Ok(StatsRefresh::Skipped | StatsRefresh::Discarded(_)) => {
            writeln!(out, "stats unavailable")?;
        }
        Ok(StatsRefresh::Failed) => writeln!(out, "stats unavailable (see log)")?,
        Err(err) => {
            tracing::warn!(event = "headless.stats.join_failed", error = %err);
            writeln!(out, "stats unavailable")?;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::client::RiskClassifier;
    use crate::layers::domain::errors::DashboardError;
    use crate::layers::domain::prediction::VALIDATION_MESSAGE;
    use crate::layers::domain::stats::tests::FakeStats;
    use crate::layers::domain::stats::StatsController;
    use crate::layers::domain::view::DashboardView;
    use async_trait::async_trait;
    use protocol::{BrandStatsPayload, PredictRequest, PredictResponse};
    use std::sync::Arc;

    struct FixedClassifier(Option<&'static str>);

    #[async_trait]
    impl RiskClassifier for FixedClassifier {
        async fn classify(
            &self,
            request: &PredictRequest,
        ) -> Result<Option<PredictResponse>, DashboardError> {
            match self.0 {
                Some(risk) => Ok(Some(PredictResponse {
                    risk: Some(risk.to_string()),
                    brand: Some(request.brand.clone()),
                    confidence: Some(88.0),
                })),
                None => Err(DashboardError::Transport("connection refused".to_string())),
            }
        }
    }

    fn setup(
        risk: Option<&'static str>,
        stats: Arc<FakeStats>,
        brand: &str,
    ) -> (PredictionController, SharedView) {
        let ui = headless_ui_config(&UiConfig::default(), brand);
        let view = SharedView::new(DashboardView::from_config(&ui));
        let controller = PredictionController::new(
            Arc::new(FixedClassifier(risk)),
            StatsController::new(stats, view.clone()),
            view.clone(),
        );
        (controller, view)
    }

    fn stats_payload() -> BrandStatsPayload {
        BrandStatsPayload {
            positive: Some(5.0),
            neutral: Some(1.0),
            negative: Some(3.0),
            irrelevant: Some(0.0),
            total: None,
        }
    }

    #[tokio::test]
    async fn prints_verdict_and_counts() {
        let stats = Arc::new(FakeStats::returning(stats_payload()));
        let (controller, view) = setup(Some("Positive"), stats.clone(), "Acme");
        let mut out = Vec::new();

        let ok = run_headless(&controller, &view, "Acme", "love it", &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(ok);
        assert!(text.contains("LOW RISK for Acme | Sentiment: POSITIVE"));
        assert!(text.contains("confidence 88.00%"));
        assert!(text.contains("stats (9 total)"));
        assert!(text.contains("Negative   3"));
        assert_eq!(stats.calls(), vec!["Acme".to_string()]);
    }

    #[tokio::test]
    async fn transport_failure_reports_server_error() {
        let (controller, view) = setup(None, Arc::new(FakeStats::default()), "Acme");
        let mut out = Vec::new();

        let ok = run_headless(&controller, &view, "Acme", "hello", &mut out)
            .await
            .unwrap();

        assert!(!ok);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Server Error"));
        assert!(!text.contains("stats"));
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let (controller, view) = setup(Some("Positive"), Arc::new(FakeStats::default()), "Acme");
        let mut out = Vec::new();

        let ok = run_headless(&controller, &view, "Acme", "   ", &mut out)
            .await
            .unwrap();

        assert!(!ok);
        assert_eq!(String::from_utf8(out).unwrap().trim(), VALIDATION_MESSAGE);
        assert!(view.lock().result.banner().is_none());
    }

    #[test]
    fn requested_brand_joins_configured_selector() {
        let ui = UiConfig {
            brands: vec!["Globex".to_string()],
            pie_chart: false,
            ..UiConfig::default()
        };
        let headless = headless_ui_config(&ui, " Acme ");
        assert_eq!(headless.brands, vec!["Globex".to_string(), "Acme".to_string()]);
        assert!(headless.pie_chart);
    }
}
