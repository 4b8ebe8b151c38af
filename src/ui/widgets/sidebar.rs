use crate::console::ConsoleApp;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Pages ");

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    // Excluded pages stay listed (dimmed) so they can be brought back
    for (idx, page) in app.tracker.pages().enumerate() {
        if idx as u16 >= inner.height {
            break;
        }

        let status = page.status();
        let required = if page.required { " *" } else { "" };
        let line_text = format!(" {} {}{}", status.marker(), page.label, required);

        let style = if page.current {
            app.theme.primary_style().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            app.theme.status_style(status)
        };

        let line_area = Rect::new(inner.x, inner.y + idx as u16, inner.width, 1);
        frame.render_widget(Paragraph::new(line_text).style(style), line_area);
    }

    let listed = app.tracker.len() as u16;
    if inner.height > listed + 2 {
        let hint = "* required  [-] hidden";
        frame.render_widget(
            Paragraph::new(hint).style(app.theme.muted_style()),
            Rect::new(inner.x + 1, inner.y + inner.height - 1, inner.width.saturating_sub(1), 1),
        );
    }
}
