use crate::layers::domain::presenter::{RiskLevel, RiskVerdict, Tone};
use crate::layers::ui::chart::ChartSurface;
use protocol::config::UiConfig;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ResultBanner {
    Loading,
    Verdict {
        level: RiskLevel,
        tone: Tone,
        text: String,
        confidence: Option<f64>,
    },
    PredictionFailed,
    ServerError,
}

impl ResultBanner {
    pub(crate) fn verdict(verdict: &RiskVerdict, brand: &str, confidence: Option<f64>) -> Self {
        ResultBanner::Verdict {
            level: verdict.level,
            tone: verdict.tone(),
            text: verdict.headline(brand),
            confidence,
        }
    }

    pub(crate) fn tone(&self) -> Tone {
        match self {
            ResultBanner::Loading => Tone::Medium,
            ResultBanner::Verdict { tone, .. } => *tone,
            ResultBanner::PredictionFailed | ResultBanner::ServerError => Tone::High,
        }
    }

    pub(crate) fn text(&self) -> String {
        match self {
            ResultBanner::Loading => "⏳ Analyzing sentiment...".to_string(),
            ResultBanner::Verdict { level, text, .. } => {
                let icon = match level {
                    RiskLevel::Low => "✅",
                    RiskLevel::Medium => "⚠",
                    RiskLevel::High => "🚨",
                    RiskLevel::Unknown => "ℹ",
                };
                format!("{icon} {text}")
            }
            ResultBanner::PredictionFailed => "❌ Prediction failed. Try again.".to_string(),
            ResultBanner::ServerError => "❌ Server Error. Please try again.".to_string(),
        }
    }

    pub(crate) fn confidence(&self) -> Option<f64> {
        match self {
            ResultBanner::Verdict { confidence, .. } => *confidence,
            _ => None,
        }
    }
}

/// The single region that shows loading, verdict and failure banners.
#[derive(Default)]
pub(crate) struct ResultRegion {
    banner: Option<ResultBanner>,
    revision: u64,
}

impl ResultRegion {
    pub(crate) fn show(&mut self, banner: ResultBanner) {
        self.banner = Some(banner);
        self.revision += 1;
    }

    pub(crate) fn banner(&self) -> Option<&ResultBanner> {
        self.banner.as_ref()
    }

    /// Bumped on every write; lets callers see that a render happened.
    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }
}

pub(crate) struct EntitySelector {
    options: Vec<String>,
    selected: Option<usize>,
}

impl EntitySelector {
    /// Sorted, de-duplicated options; the first one starts selected.
    pub(crate) fn new(options: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut options = options
            .into_iter()
            .map(|option| option.trim().to_string())
            .filter(|option| !option.is_empty())
            .collect::<Vec<_>>();
        options.sort();
        options.dedup();
        if options.is_empty() {
            return None;
        }
        Some(Self {
            options,
            selected: Some(0),
        })
    }

    pub(crate) fn options(&self) -> &[String] {
        &self.options
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Current selection, or an empty string when nothing matches.
    pub(crate) fn value(&self) -> &str {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Selects the option equal to `value` (exact match first, then
    /// case-insensitive). An unknown value leaves nothing selected.
    pub(crate) fn set_value(&mut self, value: &str) {
        self.selected = self
            .options
            .iter()
            .position(|option| option == value)
            .or_else(|| {
                self.options
                    .iter()
                    .position(|option| option.eq_ignore_ascii_case(value))
            });
    }

    pub(crate) fn select_next(&mut self) {
        let len = self.options.len();
        self.selected = Some(match self.selected {
            Some(index) => (index + 1) % len,
            None => 0,
        });
    }

    pub(crate) fn select_prev(&mut self) {
        let len = self.options.len();
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        });
    }
}

/// Everything the controllers write to. Absent optional surfaces turn the
/// matching feature into a no-op.
pub(crate) struct DashboardView {
    pub(crate) result: ResultRegion,
    pub(crate) selector: Option<EntitySelector>,
    pub(crate) charts: ChartSurface,
}

impl DashboardView {
    pub(crate) fn from_config(ui: &UiConfig) -> Self {
        Self {
            result: ResultRegion::default(),
            selector: EntitySelector::new(ui.brands.iter().cloned()),
            charts: ChartSurface::new(ui.bar_chart, ui.pie_chart),
        }
    }

    /// Points the selector at `entity` when one exists and returns what it
    /// now selects.
    pub(crate) fn sync_selector(&mut self, entity: &str) -> Option<String> {
        let selector = self.selector.as_mut()?;
        selector.set_value(entity);
        Some(selector.value().to_string())
    }

    pub(crate) fn selected_entity(&self) -> Option<String> {
        self.selector
            .as_ref()
            .map(|selector| selector.value().to_string())
    }
}

#[derive(Clone)]
pub(crate) struct SharedView(Arc<Mutex<DashboardView>>);

impl SharedView {
    pub(crate) fn new(view: DashboardView) -> Self {
        Self(Arc::new(Mutex::new(view)))
    }

    /// Never held across an await point.
    pub(crate) fn lock(&self) -> MutexGuard<'_, DashboardView> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
