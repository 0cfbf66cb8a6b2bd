use crate::app::AppState;
use crate::domain::{done_badge, Screen, Task};
use crate::ui::styles::{
    border_style, context_style, default_style, fade_style, meta_style, selected_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::time::Instant;

/// Create a list line for a task as shown on `screen`
fn create_task_line(task: &Task, screen: Screen, opacity: f64, use_emoji: bool) -> Line<'static> {
    let text_style = if task.completed {
        fade_style(opacity)
    } else {
        default_style()
    };

    let mut spans = vec![Span::styled(format!(" {}", task.title), text_style)];

    if screen == Screen::NextActions && !task.context.is_empty() {
        spans.push(Span::styled(format!(" ({})", task.context), context_style()));
    }

    let badge = done_badge(task, use_emoji);
    if !badge.is_empty() {
        spans.push(Span::styled(badge.to_string(), text_style));
    }

    if screen != Screen::Inbox && !task.project.is_empty() {
        spans.push(Span::styled(format!("   Project: {}", task.project), meta_style()));
    }

    Line::from(spans)
}

/// Render the task list for the current screen
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect, now: Instant) {
    let tasks = app.visible_tasks();
    let title = format!(" {} ({}) ", app.screen.name(), tasks.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if tasks.is_empty() {
        let empty = match app.screen {
            Screen::Inbox => " Inbox is empty. Press a to capture something.",
            _ => " Nothing here yet.",
        };
        f.render_widget(Paragraph::new(empty).style(meta_style()).block(block), area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let opacity = app.fades.opacity(task.id, now);
            let line = create_task_line(task, app.screen, opacity, app.settings.use_emoji);
            let item = ListItem::new(line);
            if idx == app.selected_index {
                item.style(selected_style())
            } else {
                item
            }
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Render the inbox capture box
pub fn render_capture_box(f: &mut Frame, app: &AppState, area: Rect) {
    let capturing = app.ui_mode == crate::domain::UiMode::Capturing;
    let line = if capturing {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(app.capture_input.clone(), default_style()),
            Span::styled("█", title_style()),
        ])
    } else {
        Line::styled("  New task...  (press a)", meta_style())
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if capturing { title_style() } else { border_style() })
            .title(Span::styled(" Capture ", title_style())),
    );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_next_action_line_shows_context() {
        let mut task = Task::new(1, "Call mom".to_string(), TaskStatus::NextAction);
        task.context = "@phone".to_string();

        let line = create_task_line(&task, Screen::NextActions, 1.0, true);
        assert_eq!(line_text(&line), " Call mom (@phone)");
    }

    #[test]
    fn test_project_line_shows_project_and_badge() {
        let mut task = Task::new(1, "Paint fence".to_string(), TaskStatus::Project);
        task.project = "Home".to_string();
        task.completed = true;

        let line = create_task_line(&task, Screen::Projects, 0.5, false);
        assert_eq!(line_text(&line), " Paint fence [x]   Project: Home");
    }

    #[test]
    fn test_inbox_line_is_title_only() {
        let mut task = Task::new(1, "Idea".to_string(), TaskStatus::Inbox);
        task.project = "Ignored".to_string();

        let line = create_task_line(&task, Screen::Inbox, 1.0, true);
        assert_eq!(line_text(&line), " Idea");
    }
}
