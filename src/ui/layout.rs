use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

pub struct Layout {
    pub full: Rect,
    pub header: Rect,
    pub sidebar: Rect,
    pub detail: Rect,
    pub message: Rect,
    pub status: Rect,
}

impl Layout {
    pub fn new(area: Rect) -> Self {
        // Message panel space is always reserved so the page list never jumps
        let rows = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(10),   // Sidebar + detail
                Constraint::Length(3), // Message panel
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let columns = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(rows[1]);

        Self {
            full: area,
            header: rows[0],
            sidebar: columns[0],
            detail: columns[1],
            message: rows[2],
            status: rows[3],
        }
    }

    pub fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
        let horizontal = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(width),
                Constraint::Fill(1),
            ])
            .split(area);

        let vertical = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(height),
                Constraint::Fill(1),
            ])
            .split(horizontal[1]);

        vertical[1]
    }
}
