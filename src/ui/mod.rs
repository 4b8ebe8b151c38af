mod layout;
mod theme;
pub mod widgets;

pub use layout::Layout;
pub use theme::Theme;

use crate::console::ConsoleApp;
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &ConsoleApp) {
    let layout = Layout::new(frame.area());

    widgets::draw_background(frame, layout.full, &app.theme);
    widgets::draw_header(frame, layout.header, app);
    widgets::draw_sidebar(frame, layout.sidebar, app);
    widgets::draw_page_detail(frame, layout.detail, app);
    widgets::draw_message_panel(frame, layout.message, app);
    widgets::draw_status_bar(frame, layout.status, app);

    // Overlays render on top of everything
    if app.show_help {
        widgets::draw_help(frame, layout.full);
    }

    if app.confirm_quit {
        widgets::draw_confirm_dialog(frame, layout.full, app);
    }
}
