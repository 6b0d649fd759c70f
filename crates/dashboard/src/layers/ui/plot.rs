use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Bar, BarChart, BarGroup, Widget};
use std::f64::consts::TAU;

use super::chart::{ChartConfig, ChartKind, Rgb};
use super::theme::Theme;

const PIE_RADIUS: f64 = 1.0;
const PIE_SAMPLES: usize = 96;

pub(super) fn paint_chart(config: &ChartConfig, area: Rect, buf: &mut Buffer) {
    match config.kind {
        ChartKind::Bar => paint_bar(config, area, buf),
        ChartKind::Pie => paint_pie(config, area, buf),
    }
}

pub(crate) fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

fn paint_bar(config: &ChartConfig, area: Rect, buf: &mut Buffer) {
    let theme = Theme::dark();
    let block = theme.block(&config.title);
    let inner = block.inner(area);
    let count = config.values.len().max(1) as u16;
    let bar_width = (inner.width.saturating_sub(count.saturating_sub(1)) / count).max(1);
    let bars = config
        .values
        .iter()
        .zip(&config.labels)
        .zip(&config.colors)
        .map(|((value, label), color)| {
            Bar::default()
                .value(*value)
                .label(Line::from(label.as_str()))
                .style(Style::default().fg(rgb(*color)))
                .value_style(Style::default().fg(Color::Black).bg(rgb(*color)))
        })
        .collect::<Vec<_>>();
    BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .render(area, buf);
}

fn paint_pie(config: &ChartConfig, area: Rect, buf: &mut Buffer) {
    let theme = Theme::dark();
    let block = theme.block(&config.title);
    let inner = block.inner(area);
    let slices = pie_slices(&config.values);
    let points = slices
        .iter()
        .map(|(start, end)| sample_slice(*start, *end))
        .collect::<Vec<_>>();
    let colors = config.colors.iter().copied().map(rgb).collect::<Vec<_>>();
    let legend = legend_line(config);
    let empty = slices.is_empty();

    // Terminal cells are roughly twice as tall as they are wide.
    let aspect = if inner.height == 0 {
        1.0
    } else {
        (inner.width as f64 / (inner.height as f64 * 2.0)).max(1.0)
    };
    let x_bound = PIE_RADIUS * aspect * 1.1;
    Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-x_bound, x_bound])
        .y_bounds([-1.2, 1.1])
        .paint(|ctx| {
            if empty {
                ctx.print(-0.3, 0.0, Span::styled("no data", theme.help_style()));
            }
            for (coords, color) in points.iter().zip(&colors) {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
            ctx.print(-x_bound, -1.2, legend.clone());
        })
        .render(area, buf);
}

/// Start and end angles (radians) of each non-empty slice, in value order.
/// Slices keep their index so colors line up with labels.
fn pie_slices(values: &[u64]) -> Vec<(f64, f64)> {
    let total: u64 = values.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    values
        .iter()
        .map(|value| {
            let sweep = TAU * (*value as f64) / (total as f64);
            let slice = (start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}

fn sample_slice(start: f64, end: f64) -> Vec<(f64, f64)> {
    if end <= start {
        return Vec::new();
    }
    let mut coords = Vec::new();
    for ring in 1..=PIE_SAMPLES / 4 {
        let radius = PIE_RADIUS * ring as f64 / (PIE_SAMPLES / 4) as f64;
        let steps = ((end - start) * radius * PIE_SAMPLES as f64 / TAU).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let angle = start + (end - start) * step as f64 / steps as f64;
            // Clockwise from twelve o'clock.
            coords.push((radius * angle.sin(), radius * angle.cos()));
        }
    }
    coords
}

fn legend_line(config: &ChartConfig) -> Line<'static> {
    let spans = config
        .labels
        .iter()
        .zip(&config.values)
        .zip(&config.colors)
        .flat_map(|((label, value), color)| {
            [
                Span::styled("■ ", Style::default().fg(rgb(*color))),
                Span::raw(format!("{label} {value}  ")),
            ]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_full_circle() {
        let slices = pie_slices(&[1, 1, 2, 0]);
        assert_eq!(slices.len(), 4);
        assert!((slices[0].1 - TAU / 4.0).abs() < 1e-9);
        assert!((slices[2].1 - TAU).abs() < 1e-9);
        assert_eq!(slices[3].0, slices[3].1);
        assert!(sample_slice(slices[3].0, slices[3].1).is_empty());
    }

    #[test]
    fn empty_values_have_no_slices() {
        assert!(pie_slices(&[0, 0, 0, 0]).is_empty());
    }

    #[test]
    fn sampled_points_stay_inside_radius() {
        let coords = sample_slice(0.0, TAU / 3.0);
        assert!(!coords.is_empty());
        assert!(coords
            .iter()
            .all(|(x, y)| (x * x + y * y).sqrt() <= PIE_RADIUS + 1e-9));
    }
}
