use crate::layers::domain::view::DashboardView;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, Paragraph, Tabs, Wrap};

use super::app::{AppState, Focus};
use super::chart::CanvasId;
use super::text::{display_width, tail_to_width, truncate_with_ellipsis};
use super::theme::{Theme, ValueStyle};

const SELECTOR_LABEL_MAX: usize = 18;

pub(crate) fn draw_ui(frame: &mut ratatui::Frame, app: &AppState, view: &mut DashboardView) {
    let theme = Theme::dark();
    let selector_height = if view.selector.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(selector_height),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, &theme, app, view, chunks[0]);
    draw_inputs(frame, &theme, app, chunks[1]);
    if selector_height > 0 {
        draw_selector(frame, &theme, app, view, chunks[2]);
    }
    draw_result(frame, &theme, view, chunks[3]);
    draw_charts(frame, &theme, view, chunks[4]);

    let mut footer_spans = vec![Span::styled(
        "Tab=focus  Enter=next/submit  ←/→=brand  Esc=quit  ",
        theme.help_style(),
    )];
    if app.confirm_quit {
        footer_spans.push(Span::styled(
            "press Esc again to quit, any other key to stay  ",
            theme.warn_style(),
        ));
    }
    let footer = Paragraph::new(Line::from(footer_spans)).block(theme.block("Controls"));
    frame.render_widget(footer, chunks[5]);

    if let Some(message) = &app.alert {
        draw_alert(frame, &theme, message);
    }
}

fn draw_header(
    frame: &mut ratatui::Frame,
    theme: &Theme,
    app: &AppState,
    view: &DashboardView,
    area: Rect,
) {
    let updated = view
        .charts
        .updated_at()
        .map(|time| humantime::format_rfc3339_seconds(time).to_string())
        .unwrap_or_else(|| "never".to_string());
    let header_line = Line::from(vec![
        Span::styled("Server: ", theme.key_style()),
        Span::styled(app.server.as_str(), theme.value_style(ValueStyle::Important)),
        Span::styled("  Charts updated: ", theme.key_style()),
        Span::styled(updated, theme.value_style(ValueStyle::Normal)),
    ]);
    let header = Paragraph::new(header_line)
        .block(theme.block("Brand Sentiment Dashboard"))
        .style(theme.value_style(ValueStyle::Normal));
    frame.render_widget(header, area);
}

fn draw_inputs(frame: &mut ratatui::Frame, theme: &Theme, app: &AppState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);
    let fields = [
        ("Entity", &app.brand_input, Focus::Brand, columns[0]),
        ("Comment", &app.comment_input, Focus::Comment, columns[1]),
    ];
    for (title, value, focus, area) in fields {
        let focused = app.focus == focus;
        let block = theme.focus_block(title, focused);
        let inner = block.inner(area);
        let visible = tail_to_width(value, inner.width as usize);
        if focused {
            let cursor_x = inner.x + display_width(&visible) as u16;
            frame.set_cursor_position((cursor_x, inner.y));
        }
        let widget = Paragraph::new(visible)
            .block(block)
            .style(theme.value_style(ValueStyle::Normal));
        frame.render_widget(widget, area);
    }
}

fn draw_selector(
    frame: &mut ratatui::Frame,
    theme: &Theme,
    app: &AppState,
    view: &DashboardView,
    area: Rect,
) {
    let Some(selector) = view.selector.as_ref() else {
        return;
    };
    let titles = selector
        .options()
        .iter()
        .map(|option| Line::from(truncate_with_ellipsis(option, SELECTOR_LABEL_MAX)))
        .collect::<Vec<_>>();
    let mut tabs = Tabs::new(titles)
        .block(theme.focus_block("Brand", app.focus == Focus::Selector))
        .style(theme.value_style(ValueStyle::Dim))
        .highlight_style(theme.highlight_style());
    if let Some(index) = selector.selected_index() {
        tabs = tabs.select(index);
    }
    frame.render_widget(tabs, area);
}

fn draw_result(frame: &mut ratatui::Frame, theme: &Theme, view: &DashboardView, area: Rect) {
    let text = match view.result.banner() {
        Some(banner) => {
            let mut lines = vec![Line::styled(banner.text(), theme.tone_style(banner.tone()))];
            if let Some(confidence) = banner.confidence() {
                lines.push(Line::styled(
                    format!("confidence {confidence:.2}%"),
                    theme.value_style(ValueStyle::Dim),
                ));
            }
            Text::from(lines)
        }
        None => Text::styled(
            "enter an entity and a comment, then press Enter",
            theme.value_style(ValueStyle::Dim),
        ),
    };
    let widget = Paragraph::new(text)
        .block(theme.block("Risk"))
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

fn draw_charts(frame: &mut ratatui::Frame, theme: &Theme, view: &mut DashboardView, area: Rect) {
    let canvases = [CanvasId::Bar, CanvasId::Pie]
        .into_iter()
        .filter(|id| view.charts.has_canvas(*id))
        .collect::<Vec<_>>();
    if canvases.is_empty() {
        return;
    }
    let constraints = canvases
        .iter()
        .map(|_| Constraint::Ratio(1, canvases.len() as u32))
        .collect::<Vec<_>>();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (id, area) in canvases.into_iter().zip(columns.iter().copied()) {
        match view.charts.paint(id, area) {
            Some(pixels) => blit(pixels, frame.buffer_mut()),
            None => {
                let title = match id {
                    CanvasId::Bar => "Sentiment Count",
                    CanvasId::Pie => "Sentiment Share",
                };
                let placeholder = Paragraph::new(Line::styled(
                    "no data yet",
                    theme.value_style(ValueStyle::Dim),
                ))
                .block(theme.block(title));
                frame.render_widget(placeholder, area);
            }
        }
    }
}

fn blit(pixels: &Buffer, target: &mut Buffer) {
    let area = pixels.area;
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(src), Some(dst)) = (pixels.cell((x, y)), target.cell_mut((x, y))) {
                *dst = src.clone();
            }
        }
    }
}

fn draw_alert(frame: &mut ratatui::Frame, theme: &Theme, message: &str) {
    let area = centered(frame.area(), 50, 5);
    let widget = Paragraph::new(vec![
        Line::styled(message.to_string(), theme.warn_style()),
        Line::styled("press any key", theme.help_style()),
    ])
    .block(theme.block("Alert"))
    .wrap(Wrap { trim: true });
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
