#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleMode {
    #[default]
    Normal,
    Command,
}

impl ConsoleMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConsoleMode::Normal => "NORMAL",
            ConsoleMode::Command => "COMMAND",
        }
    }

    pub fn transition(&self, action: ModeAction) -> ConsoleMode {
        match (self, action) {
            (ConsoleMode::Normal, ModeAction::EnterCommand) => ConsoleMode::Command,
            (ConsoleMode::Command, ModeAction::Escape) => ConsoleMode::Normal,
            (ConsoleMode::Command, ModeAction::Execute) => ConsoleMode::Normal,
            _ => *self,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    EnterCommand,
    Escape,
    Execute,
}

/// Single-line editor for `:` commands
#[derive(Debug, Default, Clone)]
pub struct CommandLine {
    content: String,
    /// Cursor position in chars
    cursor: usize,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = self.byte_position(self.cursor);
        self.content.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let start = self.byte_position(self.cursor);
        let end = self.byte_position(self.cursor + 1);
        self.content.drain(start..end);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    /// Take the line, leaving the editor empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn byte_position(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}
