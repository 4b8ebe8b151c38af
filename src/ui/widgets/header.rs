use crate::console::ConsoleApp;
use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn draw_header(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let time = Local::now().format("%H:%M").to_string();

    let left = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            app.config.general.title.as_str(),
            app.theme.primary_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" (v{})", env!("CARGO_PKG_VERSION")), app.theme.muted_style()),
    ]));
    frame.render_widget(left, area);

    let summary = app.tracker.summary();
    let progress_style = if summary.complete {
        app.theme.success_style()
    } else {
        app.theme.muted_style()
    };
    let right = Paragraph::new(Line::from(vec![
        Span::styled(format!("[{}/{} done]", summary.done, summary.rendered), progress_style),
        Span::raw("  "),
        Span::styled(time, app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(right, area);
}
