use crate::layers::domain::prediction::PredictionController;
use crate::layers::domain::view::SharedView;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{AppState, Focus};

/// Applies one key press. Returns true when the dashboard should exit.
pub(crate) fn handle_key_event(
    key: KeyEvent,
    app: &mut AppState,
    controller: &PredictionController,
    view: &SharedView,
) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    if app.alert.is_some() {
        app.dismiss_alert();
        return false;
    }
    if app.confirm_quit {
        if key.code == KeyCode::Esc {
            return true;
        }
        app.confirm_quit = false;
    }

    match key.code {
        KeyCode::Esc => app.confirm_quit = true,
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Enter => match app.focus {
            Focus::Brand => app.focus = Focus::Comment,
            Focus::Comment => submit(app, controller),
            Focus::Selector => refresh_selected(controller, view),
        },
        KeyCode::Left if app.focus == Focus::Selector => {
            move_selection(controller, view, false);
        }
        KeyCode::Right if app.focus == Focus::Selector => {
            move_selection(controller, view, true);
        }
        KeyCode::Backspace => {
            if let Some(input) = app.active_input_mut() {
                input.pop();
            }
        }
        KeyCode::Char(ch) => {
            if let Some(input) = app.active_input_mut() {
                input.push(ch);
            }
        }
        _ => {}
    }
    false
}

fn submit(app: &mut AppState, controller: &PredictionController) {
    match controller.begin(&app.brand_input, &app.comment_input) {
        Ok(pending) => {
            tokio::spawn(async move {
                if let Err(err) = pending.run().await {
                    tracing::debug!(event = "prediction.settled", error = %err);
                }
            });
        }
        Err(err) => app.show_alert(err.to_string()),
    }
}

fn move_selection(controller: &PredictionController, view: &SharedView, forward: bool) {
    {
        let mut view = view.lock();
        let Some(selector) = view.selector.as_mut() else {
            return;
        };
        if forward {
            selector.select_next();
        } else {
            selector.select_prev();
        }
    }
    refresh_selected(controller, view);
}

fn refresh_selected(controller: &PredictionController, view: &SharedView) {
    let Some(entity) = view.lock().selected_entity() else {
        return;
    };
    controller.stats().spawn_refresh(entity);
}
