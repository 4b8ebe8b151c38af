use ratatui::style::{Color, Modifier, Style};

use crate::tracker::PageStatus;

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub foreground: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Yellow,
            secondary: Color::Cyan,
            background: Color::Reset,
            foreground: Color::White,
            error: Color::Red,
            success: Color::Green,
            warning: Color::Magenta,
            border: Color::DarkGray,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn status_style(&self, status: PageStatus) -> Style {
        match status {
            PageStatus::Done => self.success_style(),
            PageStatus::Dirty => Style::default().fg(self.warning),
            PageStatus::Blocked => self.error_style(),
            PageStatus::Hidden => self.muted_style(),
            PageStatus::Pending => self.style(),
        }
    }

    pub fn mode_style(&self, mode: &str) -> Style {
        let color = match mode {
            "NORMAL" => self.secondary,
            "COMMAND" => self.primary,
            _ => self.foreground,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
