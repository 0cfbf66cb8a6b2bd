pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;
pub mod tabs;

use crate::app::AppState;
use crate::domain::{Screen, UiMode};
use input_form::{render_add_task, render_assign_modal};
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::{render_capture_box, render_list_pane};
use ratatui::{text::Line, widgets::Paragraph, Frame};
use std::time::Instant;
use styles::meta_style;
use tabs::render_tabs;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState, now: Instant) {
    let size = f.size();
    let layout = create_layout(size, app.screen == Screen::Inbox);

    render_tabs(f, app, layout.tabs_area);
    render_keybindings(f, app.screen, app.ui_mode, layout.keybindings_area);

    match app.screen {
        Screen::AddTask => render_add_task(f, app, layout.content_area),
        _ => render_list_pane(f, app, layout.content_area, now),
    }

    if let Some(capture_area) = layout.capture_area {
        render_capture_box(f, app, capture_area);
    }

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Line::raw(format!(" {}", message))).style(meta_style());
        f.render_widget(status, layout.status_area);
    }

    if app.ui_mode == UiMode::AssigningNext {
        render_assign_modal(f, app, size);
    }
}
