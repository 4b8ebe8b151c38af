use crate::ui::Layout;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn draw_help(frame: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Pages", bold)),
        Line::from("  j/k      Next / previous page"),
        Line::from("  1-9      Jump to page"),
        Line::from("  space    Toggle complete"),
        Line::from("  b        Toggle blocked"),
        Line::from("  d        Toggle dirty"),
        Line::from("  x        Exclude / include page"),
        Line::from("  Enter    Submit"),
        Line::from(""),
        Line::from(Span::styled("Commands", bold)),
        Line::from("  :register <key> [label | --label <text>] [required] [hidden]"),
        Line::from("  :complete|incomplete <key>"),
        Line::from("  :block|unblock <key>"),
        Line::from("  :dirty|clean <key>"),
        Line::from("  :include|exclude <key>"),
        Line::from("  :show <key>   :remove <key>"),
        Line::from("  :status       :q"),
        Line::from(""),
        Line::from(Span::styled("Press Escape to close", Style::default().fg(Color::DarkGray))),
    ];

    let height = help_text.len() as u16 + 2;
    let width = 52u16.min(area.width.saturating_sub(4));
    let help_area = Layout::centered_box(area, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Help ")
        .title_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}
