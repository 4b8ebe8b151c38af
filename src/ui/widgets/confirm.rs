use crate::console::ConsoleApp;
use crate::ui::Layout;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn draw_confirm_dialog(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let outstanding = app.tracker.incomplete_pages().len();
    let message = if outstanding == 0 {
        "Quit without submitting?".to_string()
    } else {
        format!("Quit with {outstanding} incomplete page(s)?")
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, app.theme.style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", app.theme.success_style().add_modifier(Modifier::BOLD)),
            Span::raw(" - Yes    "),
            Span::styled("n", app.theme.error_style().add_modifier(Modifier::BOLD)),
            Span::raw(" - No"),
        ]),
    ];

    let dialog_area = Layout::centered_box(area, 44, 6);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.primary_style())
        .title(" Quit ")
        .title_style(app.theme.primary_style().add_modifier(Modifier::BOLD));

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        dialog_area,
    );
}
