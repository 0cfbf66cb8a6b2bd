use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Secondary detail text (project label, counts)
pub fn meta_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Context tag style
pub fn context_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Active tab style
pub fn active_tab_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Style for a completed task at the given remaining opacity
pub fn fade_style(opacity: f64) -> Style {
    let style = Style::default().add_modifier(Modifier::CROSSED_OUT);
    if opacity > 0.66 {
        style.fg(Color::Green)
    } else if opacity > 0.33 {
        style.fg(Color::Gray).add_modifier(Modifier::DIM)
    } else {
        style.fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }
}
