use crate::app::{AppState, FormField, InputFormState};
use crate::ui::{
    layout::{create_modal_area, split_add_task},
    styles::{border_style, meta_style, modal_bg_style, modal_title_style, title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Title => "Task Title:",
        FormField::Project => "Project (e.g., Work):",
        FormField::Context => "Context (e.g., @home):",
    }
}

/// Label and input lines for every field of a form
fn form_lines(form: &InputFormState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];

    for field in form.fields() {
        let editing = form.current_field() == *field;
        let label = if editing {
            format!("{} (editing)", field_label(*field))
        } else {
            field_label(*field).to_string()
        };
        lines.push(Line::raw(label));

        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(form.value(*field).to_string(), modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]));
        lines.push(Line::raw(""));
    }

    lines
}

/// Render the Add Task screen: form on the left, known projects on the right
pub fn render_add_task(f: &mut Frame, app: &AppState, area: Rect) {
    let (form_area, projects_area) = split_add_task(area);

    let mut lines = form_lines(&app.add_form);
    lines.push(Line::styled(
        "Tab to switch fields  ·  Enter to add  ·  Esc to go back",
        meta_style(),
    ));

    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Add Task ", title_style())),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(form, form_area);

    let projects: Vec<ListItem> = app
        .store
        .projects()
        .iter()
        .map(|p| ListItem::new(format!(" {}", p)))
        .collect();
    let projects = List::new(projects).style(meta_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Known Projects ", title_style())),
    );
    f.render_widget(projects, projects_area);
}

/// Render the "Assign Project & Context" modal over the inbox
pub fn render_assign_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.assign_form else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = form_lines(form);
    lines.push(Line::raw("Tab to switch fields  ·  Enter to confirm  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Assign Project & Context ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
