use crate::tracker::{Page, WizardTracker};

/// Key hints shown in the status bar, refreshed after every key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBarState {
    pub left_hint: String,
    pub right_hint: String,
}

impl StatusBarState {
    /// Pick hints for the wizard's current situation
    pub fn for_tracker(tracker: &WizardTracker) -> Self {
        match tracker.current_page() {
            None => Self::no_page(),
            Some(page) if page.blocked => Self::blocked_page(),
            Some(_) if tracker.all_pages_visited() && tracker.is_complete() => Self::ready(),
            Some(page) => Self::page(page),
        }
    }

    pub fn page(page: &Page) -> Self {
        let toggle = if page.done { "space: reopen" } else { "space: complete" };
        Self {
            left_hint: format!("j/k: pages  {toggle}"),
            right_hint: "b: block  d: dirty  x: exclude  ?: help".to_string(),
        }
    }

    pub fn blocked_page() -> Self {
        Self {
            left_hint: "Page blocked".to_string(),
            right_hint: "b: unblock  j/k: pages".to_string(),
        }
    }

    pub fn ready() -> Self {
        Self {
            left_hint: "All pages complete".to_string(),
            right_hint: "Enter: submit  q: quit".to_string(),
        }
    }

    pub fn no_page() -> Self {
        Self {
            left_hint: "No page in view".to_string(),
            right_hint: "j: first page  :register <key>".to_string(),
        }
    }

    pub fn command_mode() -> Self {
        Self {
            left_hint: String::new(),
            right_hint: "Enter: run  Esc: cancel".to_string(),
        }
    }

    pub fn confirm() -> Self {
        Self {
            left_hint: "Discard this wizard?".to_string(),
            right_hint: "y: quit  n: stay".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::PageState;

    #[test]
    fn test_hints_follow_tracker_state() {
        let mut tracker = WizardTracker::new();
        assert_eq!(StatusBarState::for_tracker(&tracker), StatusBarState::no_page());

        tracker.register_page("a", "A", PageState::new().required(true));
        tracker.set_current("a");
        assert!(StatusBarState::for_tracker(&tracker).left_hint.contains("space: complete"));

        tracker.block("a");
        assert_eq!(StatusBarState::for_tracker(&tracker), StatusBarState::blocked_page());

        tracker.unblock("a");
        tracker.mark_complete("a");
        assert_eq!(StatusBarState::for_tracker(&tracker), StatusBarState::ready());
    }
}
