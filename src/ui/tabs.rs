use crate::app::AppState;
use crate::domain::{status_counts, Screen};
use crate::ui::styles::{active_tab_style, meta_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Tab label with a task count where the screen has a list
pub fn tab_label(screen: Screen, counts: (usize, usize, usize)) -> String {
    let (inbox, projects, next) = counts;
    let count = match screen {
        Screen::Inbox => Some(inbox),
        Screen::Projects => Some(projects),
        Screen::NextActions => Some(next),
        Screen::AddTask => None,
    };
    match count {
        Some(n) => format!("{} {} ({})", screen.index() + 1, screen.name(), n),
        None => format!("{} {}", screen.index() + 1, screen.name()),
    }
}

/// Render the screen tab strip
pub fn render_tabs(f: &mut Frame, app: &AppState, area: Rect) {
    let counts = status_counts(app.store.tasks());

    let mut spans = vec![Span::raw(" ")];
    for screen in Screen::all() {
        let style = if *screen == app.screen {
            active_tab_style()
        } else {
            meta_style()
        };
        spans.push(Span::styled(tab_label(*screen, counts), style));
        spans.push(Span::raw("   "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
