mod cli;
mod config;
mod layers;

use crate::cli::Args;
use crate::config::load_dashboard_config;
use crate::layers::client::HttpBackend;
use crate::layers::domain::{DashboardView, PredictionController, SharedView, StatsController};
use crate::layers::service::{headless_ui_config, init_tracing, run_headless};
use crate::layers::ui::{draw_ui, handle_key_event, restore_terminal, setup_terminal, AppState};
use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let file_guard = init_tracing(&args.log_dir, args.log_to_stderr)?;

    let config = load_dashboard_config(args.config.as_ref(), args.server.as_deref())?;
    let backend = Arc::new(
        HttpBackend::new(&config.server)
            .with_context(|| format!("failed to build client for {}", config.server.base_url))?,
    );
    tracing::info!(event = "dashboard.start", server = %config.server.base_url);

    let headless = args.brand.as_deref().zip(args.comment.as_deref());
    let ui_config = match headless {
        Some((brand, _)) => headless_ui_config(&config.ui, brand),
        None => config.ui.clone(),
    };
    let view = SharedView::new(DashboardView::from_config(&ui_config));
    let stats = StatsController::new(backend.clone(), view.clone());
    let controller = PredictionController::new(backend, stats, view.clone());

    if let Some((brand, comment)) = headless {
        let mut stdout = std::io::stdout();
        if !run_headless(&controller, &view, brand, comment, &mut stdout).await? {
            drop(file_guard);
            std::process::exit(1);
        }
        return Ok(());
    }

    let initial = view.lock().selected_entity();
    if let Some(entity) = initial {
        controller.stats().spawn_refresh(entity);
    }

    let mut terminal = setup_terminal()?;
    let has_selector = view.lock().selector.is_some();
    let mut app = AppState::new(config.server.base_url.clone(), has_selector);

    let tick_rate = Duration::from_millis(config.ui.tick_ms);
    loop {
        terminal.draw(|frame| draw_ui(frame, &app, &mut view.lock()))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(key, &mut app, &controller, &view) {
                    break;
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    tracing::info!(event = "dashboard.exit");
    drop(file_guard);
    Ok(())
}
