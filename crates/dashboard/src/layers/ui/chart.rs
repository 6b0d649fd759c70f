use crate::layers::domain::errors::{ChartError, DashboardError};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

use super::plot::paint_chart;

pub(crate) type Rgb = (u8, u8, u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum CanvasId {
    Bar,
    Pie,
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasId::Bar => f.write_str("barChart"),
            CanvasId::Pie => f.write_str("pieChart"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChartKind {
    Bar,
    Pie,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ChartConfig {
    pub(crate) kind: ChartKind,
    pub(crate) title: String,
    pub(crate) labels: Vec<String>,
    pub(crate) values: Vec<u64>,
    pub(crate) colors: Vec<Rgb>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ChartHandle(u64);

impl ChartHandle {
    pub(crate) fn id(self) -> u64 {
        self.0
    }
}

/// A named render target. `pixels` holds the last rasterized frame of the
/// chart bound to it.
pub(crate) struct Canvas {
    id: CanvasId,
    pixels: Buffer,
    stale: bool,
}

impl Canvas {
    fn new(id: CanvasId) -> Self {
        Self {
            id,
            pixels: Buffer::empty(Rect::default()),
            stale: true,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.pixels.reset();
        self.stale = true;
    }

    #[cfg(test)]
    pub(crate) fn is_blank(&self) -> bool {
        self.pixels.content.iter().all(|cell| cell.symbol() == " ")
    }
}

struct LiveChart {
    canvas: CanvasId,
    config: ChartConfig,
}

/// Registry of live chart instances. A canvas may host at most one of them.
#[derive(Default)]
pub(crate) struct ChartEngine {
    next_id: u64,
    live: BTreeMap<ChartHandle, LiveChart>,
}

impl ChartEngine {
    pub(crate) fn create(
        &mut self,
        canvas: &Canvas,
        config: ChartConfig,
    ) -> Result<ChartHandle, ChartError> {
        if let Some((handle, _)) = self.live.iter().find(|(_, chart)| chart.canvas == canvas.id) {
            return Err(ChartError::CanvasInUse(canvas.id, handle.id()));
        }
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.live.insert(
            handle,
            LiveChart {
                canvas: canvas.id,
                config,
            },
        );
        tracing::debug!(event = "chart.created", canvas = %canvas.id, chart = handle.id());
        Ok(handle)
    }

    pub(crate) fn destroy(&mut self, handle: ChartHandle) -> Result<(), ChartError> {
        match self.live.remove(&handle) {
            Some(chart) => {
                tracing::debug!(event = "chart.destroyed", canvas = %chart.canvas, chart = handle.id());
                Ok(())
            }
            None => Err(ChartError::UnknownHandle(handle.id())),
        }
    }

    pub(crate) fn config(&self, handle: ChartHandle) -> Option<&ChartConfig> {
        self.live.get(&handle).map(|chart| &chart.config)
    }

    pub(crate) fn live_on(&self, canvas: CanvasId) -> usize {
        self.live
            .values()
            .filter(|chart| chart.canvas == canvas)
            .count()
    }

    #[cfg(test)]
    pub(crate) fn live_count(&self) -> usize {
        self.live.len()
    }

    fn render(&self, handle: ChartHandle, canvas: &mut Canvas, area: Rect) {
        canvas.pixels.resize(area);
        canvas.pixels.reset();
        if let Some(chart) = self.live.get(&handle) {
            paint_chart(&chart.config, area, &mut canvas.pixels);
        }
        canvas.stale = false;
    }
}

/// Owns the bar and pie render targets and the chart bound to each.
pub(crate) struct ChartSurface {
    engine: ChartEngine,
    bar_canvas: Option<Canvas>,
    pie_canvas: Option<Canvas>,
    bar: Option<ChartHandle>,
    pie: Option<ChartHandle>,
    updated_at: Option<SystemTime>,
}

impl ChartSurface {
    pub(crate) fn new(bar_canvas: bool, pie_canvas: bool) -> Self {
        Self {
            engine: ChartEngine::default(),
            bar_canvas: bar_canvas.then(|| Canvas::new(CanvasId::Bar)),
            pie_canvas: pie_canvas.then(|| Canvas::new(CanvasId::Pie)),
            bar: None,
            pie: None,
            updated_at: None,
        }
    }

    pub(crate) fn has_canvas(&self, id: CanvasId) -> bool {
        match id {
            CanvasId::Bar => self.bar_canvas.is_some(),
            CanvasId::Pie => self.pie_canvas.is_some(),
        }
    }

    /// Replaces both charts. Each canvas goes through destroy, clear, create
    /// in that order so the engine never sees two charts on one canvas.
    pub(crate) fn redraw(
        &mut self,
        bar_data: &[u64],
        pie_data: &[u64],
        labels: &[&str],
        colors: &[Rgb],
        caption: &str,
    ) -> Result<(), DashboardError> {
        let (Some(bar_canvas), Some(pie_canvas)) =
            (self.bar_canvas.as_mut(), self.pie_canvas.as_mut())
        else {
            return Err(DashboardError::RenderPrecondition(
                "bar and pie canvases are required",
            ));
        };

        if let Some(handle) = self.bar.take() {
            self.engine.destroy(handle)?;
        }
        if let Some(handle) = self.pie.take() {
            self.engine.destroy(handle)?;
        }

        bar_canvas.clear();
        pie_canvas.clear();

        let labels: Vec<String> = labels.iter().map(|label| label.to_string()).collect();
        let bar = self.engine.create(
            bar_canvas,
            ChartConfig {
                kind: ChartKind::Bar,
                title: format!("Sentiment Count {caption}"),
                labels: labels.clone(),
                values: bar_data.to_vec(),
                colors: colors.to_vec(),
            },
        )?;
        self.bar = Some(bar);
        let pie = self.engine.create(
            pie_canvas,
            ChartConfig {
                kind: ChartKind::Pie,
                title: format!("Sentiment Share {caption}"),
                labels,
                values: pie_data.to_vec(),
                colors: colors.to_vec(),
            },
        )?;
        self.pie = Some(pie);
        self.updated_at = Some(SystemTime::now());
        Ok(())
    }

    pub(crate) fn chart(&self, id: CanvasId) -> Option<&ChartConfig> {
        let handle = match id {
            CanvasId::Bar => self.bar?,
            CanvasId::Pie => self.pie?,
        };
        self.engine.config(handle)
    }

    pub(crate) fn live_charts(&self, id: CanvasId) -> usize {
        self.engine.live_on(id)
    }

    pub(crate) fn updated_at(&self) -> Option<SystemTime> {
        self.updated_at
    }

    /// Rasterizes the chart bound to `id` into its canvas when the canvas was
    /// cleared or resized, and returns the canvas pixels.
    pub(crate) fn paint(&mut self, id: CanvasId, area: Rect) -> Option<&Buffer> {
        let (canvas, handle) = match id {
            CanvasId::Bar => (self.bar_canvas.as_mut()?, self.bar?),
            CanvasId::Pie => (self.pie_canvas.as_mut()?, self.pie?),
        };
        if canvas.stale || canvas.pixels.area != area {
            self.engine.render(handle, canvas, area);
        }
        Some(&canvas.pixels)
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut ChartEngine {
        &mut self.engine
    }

    #[cfg(test)]
    pub(crate) fn canvas(&self, id: CanvasId) -> Option<&Canvas> {
        match id {
            CanvasId::Bar => self.bar_canvas.as_ref(),
            CanvasId::Pie => self.pie_canvas.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 4] = ["Positive", "Neutral", "Negative", "Irrelevant"];
    const COLORS: [Rgb; 4] = [
        (0x28, 0xa7, 0x45),
        (0xff, 0xc1, 0x07),
        (0xdc, 0x35, 0x45),
        (0x6c, 0x75, 0x7d),
    ];

    #[test]
    fn repeated_redraw_keeps_one_chart_per_canvas() {
        let mut surface = ChartSurface::new(true, true);
        surface
            .redraw(&[1, 2, 3, 4], &[1, 2, 3, 4], &LABELS, &COLORS, "Acme")
            .expect("first redraw");
        surface
            .redraw(&[5, 0, 0, 1], &[5, 0, 0, 1], &LABELS, &COLORS, "Acme")
            .expect("second redraw");

        assert_eq!(surface.live_charts(CanvasId::Bar), 1);
        assert_eq!(surface.live_charts(CanvasId::Pie), 1);
        assert_eq!(surface.engine_mut().live_count(), 2);
        let bar = surface.chart(CanvasId::Bar).expect("bar chart");
        assert_eq!(bar.values, vec![5, 0, 0, 1]);
        assert_eq!(bar.kind, ChartKind::Bar);
        assert_eq!(surface.chart(CanvasId::Pie).expect("pie").kind, ChartKind::Pie);
    }

    #[test]
    fn engine_rejects_second_chart_on_busy_canvas() {
        let mut surface = ChartSurface::new(true, true);
        surface
            .redraw(&[1, 1, 1, 1], &[1, 1, 1, 1], &LABELS, &COLORS, "")
            .expect("redraw");
        let canvas = Canvas::new(CanvasId::Bar);
        let config = surface.chart(CanvasId::Bar).cloned().expect("bar chart");
        let err = surface
            .engine_mut()
            .create(&canvas, config)
            .expect_err("canvas busy");
        assert!(matches!(err, ChartError::CanvasInUse(CanvasId::Bar, _)));
    }

    #[test]
    fn redraw_clears_previous_pixels() {
        let mut surface = ChartSurface::new(true, true);
        let area = Rect::new(0, 0, 30, 12);
        surface
            .redraw(&[3, 1, 4, 1], &[3, 1, 4, 1], &LABELS, &COLORS, "")
            .expect("redraw");
        assert!(surface.paint(CanvasId::Bar, area).is_some());
        assert!(!surface.canvas(CanvasId::Bar).expect("canvas").is_blank());

        surface
            .redraw(&[0, 0, 0, 0], &[0, 0, 0, 0], &LABELS, &COLORS, "")
            .expect("redraw");
        assert!(surface.canvas(CanvasId::Bar).expect("canvas").is_blank());
    }

    #[test]
    fn missing_canvas_is_a_render_precondition() {
        let mut surface = ChartSurface::new(true, false);
        let err = surface
            .redraw(&[1, 2, 3, 4], &[1, 2, 3, 4], &LABELS, &COLORS, "")
            .expect_err("pie canvas missing");
        assert!(matches!(err, DashboardError::RenderPrecondition(_)));
        assert_eq!(surface.live_charts(CanvasId::Bar), 0);
        assert!(surface.paint(CanvasId::Pie, Rect::new(0, 0, 10, 5)).is_none());
    }

    #[test]
    fn destroying_unknown_handle_fails() {
        let mut engine = ChartEngine::default();
        assert_eq!(
            engine.destroy(ChartHandle(7)),
            Err(ChartError::UnknownHandle(7))
        );
    }
}
