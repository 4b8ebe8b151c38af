mod confirm;
mod header;
mod help;
mod message_panel;
mod page_detail;
mod sidebar;
mod status_bar;

pub use confirm::draw_confirm_dialog;
pub use header::draw_header;
pub use help::draw_help;
pub use message_panel::draw_message_panel;
pub use page_detail::draw_page_detail;
pub use sidebar::draw_sidebar;
pub use status_bar::draw_status_bar;

use super::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Block;

pub fn draw_background(frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(Block::default().style(theme.style()), area);
}
