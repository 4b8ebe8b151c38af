use crate::console::{ConsoleApp, ConsoleMode};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let mode_name = app.mode.display_name();

    let mut left_spans = vec![
        Span::raw(" "),
        Span::styled(format!(" {} ", mode_name), app.theme.mode_style(mode_name)),
        Span::raw(" "),
    ];

    if app.mode == ConsoleMode::Command {
        left_spans.push(Span::styled(":", app.theme.primary_style()));
        left_spans.push(Span::raw(app.command_line.content()));
        left_spans.push(Span::styled("│", app.theme.primary_style()));
    } else {
        left_spans.push(Span::styled(app.status_bar.left_hint.as_str(), app.theme.muted_style()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(left_spans)).style(app.theme.style()),
        area,
    );

    let right = Line::from(Span::styled(
        format!("{} ", app.status_bar.right_hint),
        app.theme.muted_style(),
    ));
    let right_width = right.width() as u16;
    if area.width > right_width {
        let right_area = Rect {
            x: area.x + area.width - right_width,
            y: area.y,
            width: right_width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), right_area);
    }
}
