pub(crate) mod errors;
pub(crate) mod prediction;
pub(crate) mod presenter;
pub(crate) mod stats;
pub(crate) mod view;

pub(crate) use prediction::PredictionController;
pub(crate) use stats::StatsController;
pub(crate) use view::{DashboardView, SharedView};
