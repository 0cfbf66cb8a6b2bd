use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub tabs_area: Rect,
    pub keybindings_area: Rect,
    pub content_area: Rect,
    /// Inbox capture box below the list (Inbox only)
    pub capture_area: Option<Rect>,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top: screen tabs (1 row), keybindings (1 row)
/// - Middle: screen content, with a capture box under the inbox list
/// - Bottom: status line (1 row)
pub fn create_layout(area: Rect, show_capture: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let (content_area, capture_area) = if show_capture {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(main_chunks[2]);
        (split[0], Some(split[1]))
    } else {
        (main_chunks[2], None)
    };

    MainLayout {
        tabs_area: main_chunks[0],
        keybindings_area: main_chunks[1],
        content_area,
        capture_area,
        status_area: main_chunks[3],
    }
}

/// Split the Add Task content: form (60%) | known projects (40%)
pub fn split_add_task(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Create centered modal area (for the assign form)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(11),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
