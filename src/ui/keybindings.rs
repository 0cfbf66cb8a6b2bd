use crate::domain::{Screen, UiMode};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Key hints for the current screen and mode
pub fn hints_for(screen: Screen, mode: UiMode) -> &'static str {
    match (mode, screen) {
        (UiMode::Capturing, _) => " type title   Enter add   Esc cancel",
        (UiMode::AssigningNext, _) => " Tab switch field   Enter confirm   Esc cancel",
        (UiMode::Normal, Screen::Inbox) => {
            " ↑/↓ select   a add   n next action   p project   x delete   Tab/1-4 screens   q quit"
        }
        (UiMode::Normal, Screen::Projects) => {
            " ↑/↓ select   d done   n next action   x delete   a capture   Tab/1-4 screens   q quit"
        }
        (UiMode::Normal, Screen::NextActions) => {
            " ↑/↓ select   d done   x delete   a capture   Tab/1-4 screens   q quit"
        }
        (UiMode::Normal, Screen::AddTask) => {
            " Tab/↑/↓ switch field   Enter add   Esc back to inbox   Ctrl+C quit"
        }
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, screen: Screen, mode: UiMode, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints_for(screen, mode))).style(hint_style());
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_mode() {
        assert!(hints_for(Screen::Inbox, UiMode::Normal).contains("next action"));
        assert!(hints_for(Screen::Projects, UiMode::Normal).contains("d done"));
        assert!(hints_for(Screen::Inbox, UiMode::Capturing).contains("Esc cancel"));
        assert!(hints_for(Screen::AddTask, UiMode::Normal).contains("Esc back"));
    }
}
