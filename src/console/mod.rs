mod hints;
mod mode;

pub use hints::StatusBarState;
pub use mode::{CommandLine, ConsoleMode, ModeAction};

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::WizardConfig;
use crate::script::{parse_command, Command};
use crate::tracker::{TrackerEvent, TrackerSummary, WizardTracker};
use crate::ui::Theme;

/// Actions the console loop must carry out on the app's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    /// Every page visited and complete; hand the summary back to the caller
    Submit(TrackerSummary),
    /// Leave without submitting
    Quit,
}

/// Message displayed to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

/// Interactive walkthrough of one wizard session
pub struct ConsoleApp {
    pub config: WizardConfig,
    pub theme: Theme,
    pub tracker: WizardTracker,
    events: mpsc::UnboundedReceiver<TrackerEvent>,

    pub mode: ConsoleMode,
    pub command_line: CommandLine,

    pub message: Option<Message>,
    pub status_bar: StatusBarState,
    pub show_help: bool,
    pub confirm_quit: bool,
}

impl ConsoleApp {
    /// Build a tracker from `config` and bring the first page into view
    pub fn new(config: WizardConfig) -> Self {
        let tracker = config.build_tracker();
        Self::with_tracker(config, tracker)
    }

    pub fn with_tracker(config: WizardConfig, mut tracker: WizardTracker) -> Self {
        let events = tracker.subscribe();
        if let Some(first) = tracker.next_page().map(str::to_string) {
            tracker.set_current(&first);
        }

        let mut app = Self {
            config,
            theme: Theme::default(),
            tracker,
            events,
            mode: ConsoleMode::Normal,
            command_line: CommandLine::new(),
            message: None,
            status_bar: StatusBarState::default(),
            show_help: false,
            confirm_quit: false,
        };
        app.drain_events();
        app.update_status_bar();
        app
    }

    /// Submit is offered only once every rendered page has been seen
    pub fn can_show_submit(&self) -> bool {
        self.tracker.all_pages_visited()
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn tick(&mut self) {
        self.drain_events();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ConsoleAction> {
        if self.confirm_quit {
            let result = self.handle_confirm_key(key);
            self.update_status_bar();
            return result;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                self.show_help = false;
                self.update_status_bar();
            }
            return None;
        }

        let result = match self.mode {
            ConsoleMode::Normal => self.handle_normal_mode(key),
            ConsoleMode::Command => self.handle_command_mode(key),
        };

        self.drain_events();
        self.update_status_bar();
        result
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Option<ConsoleAction> {
        // Any key dismisses the previous message
        self.message = None;

        match key.code {
            KeyCode::Char(':') => {
                self.mode = self.mode.transition(ModeAction::EnterCommand);
                self.command_line.clear();
            }
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => self.go_next(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => self.go_back(),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                let key = self.tracker.rendered_pages().nth(idx).map(|p| p.key.clone());
                if let Some(key) = key {
                    self.tracker.set_current(&key);
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('c') => self.toggle_complete(),
            KeyCode::Char('b') => self.toggle_block(),
            KeyCode::Char('d') => self.toggle_dirty(),
            KeyCode::Char('x') => self.toggle_rendered(),
            KeyCode::Enter => return self.submit(),
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('q') => self.confirm_quit = true,
            _ => {}
        }
        None
    }

    fn handle_command_mode(&mut self, key: KeyEvent) -> Option<ConsoleAction> {
        match key.code {
            KeyCode::Esc => {
                self.mode = self.mode.transition(ModeAction::Escape);
                self.command_line.clear();
            }
            KeyCode::Enter => {
                let line = self.command_line.take();
                self.mode = self.mode.transition(ModeAction::Execute);
                return self.execute_command(&line);
            }
            KeyCode::Backspace => {
                if self.command_line.is_empty() {
                    self.mode = self.mode.transition(ModeAction::Escape);
                } else {
                    self.command_line.delete_back();
                }
            }
            KeyCode::Left => self.command_line.move_left(),
            KeyCode::Right => self.command_line.move_right(),
            KeyCode::Char(c) => self.command_line.insert(c),
            _ => {}
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<ConsoleAction> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.confirm_quit = false;
                return Some(ConsoleAction::Quit);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_quit = false;
            }
            _ => {}
        }
        None
    }

    fn execute_command(&mut self, line: &str) -> Option<ConsoleAction> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                self.set_error(e.to_string());
                return None;
            }
        };
        debug!("Console command: {:?}", command);

        match command {
            Command::Quit => return Some(ConsoleAction::Quit),
            Command::Help => self.show_help = true,
            Command::Status => {
                let summary = self.tracker.summary();
                self.set_info(summary.to_string());
            }
            command => {
                if let Err(e) = command.apply(&mut self.tracker) {
                    self.set_error(e.to_string());
                }
            }
        }
        None
    }

    fn current_key(&self) -> Option<String> {
        self.tracker.current_page().map(|p| p.key.clone())
    }

    fn go_next(&mut self) {
        if let Some(key) = self.tracker.next_page().map(str::to_string) {
            self.tracker.set_current(&key);
        }
    }

    fn go_back(&mut self) {
        if let Some(key) = self.tracker.previous_page().map(str::to_string) {
            self.tracker.set_current(&key);
        }
    }

    fn toggle_complete(&mut self) {
        let Some(page) = self.tracker.current_page() else {
            return;
        };
        let (key, done, blocked, label) = (page.key.clone(), page.done, page.blocked, page.label.clone());

        if done {
            self.tracker.mark_incomplete(&key);
        } else if blocked {
            self.set_error(format!("{label} is blocked; unblock it first"));
        } else {
            self.tracker.mark_complete(&key);
        }
    }

    fn toggle_block(&mut self) {
        let Some(page) = self.tracker.current_page() else {
            return;
        };
        let (key, blocked) = (page.key.clone(), page.blocked);

        if blocked {
            self.tracker.unblock(&key);
        } else {
            self.tracker.block(&key);
        }
    }

    fn toggle_dirty(&mut self) {
        let Some(page) = self.tracker.current_page() else {
            return;
        };
        let (key, dirty) = (page.key.clone(), page.dirty);

        if dirty {
            self.tracker.mark_clean(&key);
        } else {
            self.tracker.mark_dirty(&key);
        }
    }

    /// Exclude the page in view and move on, or bring it back
    fn toggle_rendered(&mut self) {
        let Some(key) = self.current_key() else {
            return;
        };
        let rendered = self.tracker.get_page(&key).is_some_and(|p| p.rendered);

        if !rendered {
            self.tracker.include_page(&key);
            return;
        }

        self.tracker.exclude_page(&key);
        let fallback = self
            .tracker
            .next_page()
            .or_else(|| self.tracker.previous_page())
            .map(str::to_string);
        if let Some(next) = fallback {
            self.tracker.set_current(&next);
        }
    }

    fn submit(&mut self) -> Option<ConsoleAction> {
        if !self.can_show_submit() {
            self.set_error("Visit every page before submitting");
            return None;
        }

        let incomplete: Vec<String> = self
            .tracker
            .incomplete_pages()
            .into_iter()
            .filter_map(|key| self.tracker.get_page(key))
            .map(|p| p.label.clone())
            .collect();
        if !incomplete.is_empty() {
            self.set_error(format!("Incomplete: {}", incomplete.join(", ")));
            return None;
        }

        let summary = self.tracker.summary();
        info!("Wizard submitted: {}", summary);
        Some(ConsoleAction::Submit(summary))
    }

    /// Turn tracker events into user-facing messages
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            // A removed page is gone from the tracker; fall back to its key
            let label = event
                .key()
                .and_then(|key| self.tracker.get_page(key))
                .map(|p| p.label.clone())
                .unwrap_or_else(|| event.key().unwrap_or_default().to_string());

            match event {
                TrackerEvent::CompletionRevoked(_) => {
                    self.set_error(format!("{label} was complete before being blocked; re-validate it"));
                }
                TrackerEvent::Excluded(_) => self.set_info(format!("{label} removed from the flow")),
                TrackerEvent::Included(_) => self.set_info(format!("{label} added to the flow")),
                TrackerEvent::Removed(_) => self.set_info(format!("{label} removed from the wizard")),
                TrackerEvent::Registered(key) => debug!("Page {:?} registered", key),
                _ => {}
            }
        }
    }

    fn update_status_bar(&mut self) {
        self.status_bar = if self.confirm_quit {
            StatusBarState::confirm()
        } else if self.mode == ConsoleMode::Command {
            StatusBarState::command_mode()
        } else {
            StatusBarState::for_tracker(&self.tracker)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneralConfig, PageConfig};
    use crossterm::event::KeyModifiers;

    fn press(app: &mut ConsoleApp, code: KeyCode) -> Option<ConsoleAction> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_command(app: &mut ConsoleApp, line: &str) -> Option<ConsoleAction> {
        press(app, KeyCode::Char(':'));
        for c in line.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter)
    }

    fn app() -> ConsoleApp {
        ConsoleApp::new(WizardConfig {
            general: GeneralConfig::default(),
            pages: vec![
                PageConfig::required("location", "Location"),
                PageConfig::new("advanced", "Advanced"),
                PageConfig::required("review", "Review"),
            ],
        })
    }

    fn current(app: &ConsoleApp) -> Option<&str> {
        app.tracker.current_page().map(|p| p.key.as_str())
    }

    #[test]
    fn test_starts_on_first_page() {
        let app = app();
        assert_eq!(current(&app), Some("location"));
        assert!(!app.can_show_submit());
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(current(&app), Some("advanced"));

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(current(&app), Some("review"));

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(current(&app), Some("review"));

        press(&mut app, KeyCode::Up);
        assert_eq!(current(&app), Some("advanced"));
        assert!(app.can_show_submit());
    }

    #[test]
    fn test_submit_requires_visits_then_completion() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert_eq!(app.message.as_ref().map(|m| m.is_error), Some(true));

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert_eq!(
            app.message.as_ref().map(|m| m.text.as_str()),
            Some("Incomplete: Review")
        );

        press(&mut app, KeyCode::Char('c'));
        match press(&mut app, KeyCode::Enter) {
            Some(ConsoleAction::Submit(summary)) => {
                assert!(summary.complete);
                assert!(summary.all_visited);
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn test_block_reports_revoked_completion() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('b'));

        let message = app.message.clone().unwrap();
        assert!(message.is_error);
        assert!(message.text.starts_with("Location was complete"));

        press(&mut app, KeyCode::Char(' '));
        assert!(!app.tracker.get_page("location").unwrap().done);
        assert_eq!(app.status_bar, StatusBarState::blocked_page());
    }

    #[test]
    fn test_exclude_moves_to_next_page() {
        let mut app = app();
        press(&mut app, KeyCode::Char('x'));

        assert!(!app.tracker.get_page("location").unwrap().rendered);
        assert_eq!(current(&app), Some("advanced"));
        assert_eq!(
            app.message.as_ref().map(|m| m.text.as_str()),
            Some("Location removed from the flow")
        );
    }

    #[test]
    fn test_command_mode_applies_script_commands() {
        let mut app = app();
        assert_eq!(type_command(&mut app, "complete review"), None);
        assert!(app.tracker.get_page("review").unwrap().done);
        assert_eq!(app.mode, ConsoleMode::Normal);

        type_command(&mut app, "frobnicate");
        assert_eq!(
            app.message.as_ref().map(|m| m.text.as_str()),
            Some("Unknown command: frobnicate")
        );

        type_command(&mut app, "status");
        assert_eq!(app.message.as_ref().map(|m| m.is_error), Some(false));

        assert_eq!(type_command(&mut app, "q"), Some(ConsoleAction::Quit));
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), None);
        assert!(app.confirm_quit);

        assert_eq!(press(&mut app, KeyCode::Char('n')), None);
        assert!(!app.confirm_quit);

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(press(&mut app, KeyCode::Char('y')), Some(ConsoleAction::Quit));
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(current(&app), Some("location"));

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn test_cancel_quit_restores_hints() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.status_bar, StatusBarState::confirm());

        press(&mut app, KeyCode::Char('n'));
        assert_ne!(app.status_bar, StatusBarState::confirm());
        assert_eq!(app.status_bar, StatusBarState::for_tracker(&app.tracker));
    }

    #[test]
    fn test_closing_help_refreshes_hints() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        app.tracker.mark_complete("location");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.status_bar, StatusBarState::for_tracker(&app.tracker));
    }

    #[test]
    fn test_remove_reports_page_label() {
        let mut app = app();
        type_command(&mut app, "remove advanced");

        assert!(app.tracker.get_page("advanced").is_none());
        let message = app.message.as_ref().unwrap();
        assert!(!message.is_error);
        assert_eq!(message.text, "advanced removed from the wizard");
    }
}
