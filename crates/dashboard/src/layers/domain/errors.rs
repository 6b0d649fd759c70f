use crate::layers::ui::chart::CanvasId;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum DashboardError {
    /// Required user input is missing; raised before any network call.
    #[error("{0}")]
    Validation(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("render surface missing: {0}")]
    RenderPrecondition(&'static str),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChartError {
    #[error("canvas {0} is already in use by chart #{1}")]
    CanvasInUse(CanvasId, u64),

    #[error("chart #{0} is not live")]
    UnknownHandle(u64),
}

impl DashboardError {
    pub(crate) fn is_validation(&self) -> bool {
        matches!(self, DashboardError::Validation(_))
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Transport(err.to_string())
    }
}
