//! Per-session completion tracking for multi-page wizards.
//!
//! A [`WizardTracker`] is created when a wizard opens and dropped when it
//! closes. UI pages register themselves on mount, validation glue marks them
//! complete or incomplete, and submit logic asks [`WizardTracker::is_complete`]
//! and [`WizardTracker::all_pages_visited`].
//!
//! Every operation tolerates unknown keys: mount/unmount races are expected,
//! so an unknown key is logged and ignored rather than reported as an error.

mod events;
mod page;

pub use events::TrackerEvent;
pub use page::{Page, PageState, PageStatus};

use events::Observers;
use std::fmt;
use tokio::sync::mpsc;
use tracing::debug;

/// Snapshot of the aggregate wizard state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackerSummary {
    pub total: usize,
    pub rendered: usize,
    pub required: usize,
    pub done: usize,
    pub visited: usize,
    pub complete: bool,
    pub all_visited: bool,
}

impl fmt::Display for TrackerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} done ({} required), {}/{} visited, {}",
            self.done,
            self.rendered,
            self.required,
            self.visited,
            self.rendered,
            if self.complete { "ready to submit" } else { "incomplete" }
        )
    }
}

/// Completion state for every page of one wizard session
#[derive(Debug, Default)]
pub struct WizardTracker {
    /// Flow order is registration order
    pages: Vec<Page>,
    observers: Observers,
}

impl WizardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive an event for every state change from now on
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<TrackerEvent> {
        self.observers.subscribe()
    }

    /// Register a page, or re-register an existing one.
    ///
    /// A new key is appended to the flow. An existing key keeps its position;
    /// its label is replaced and the set fields of `state` are merged over the
    /// prior state, so `done`/`dirty` survive a remount. Re-registration
    /// renders the page again unless `state` says otherwise.
    /// `PageState::reset()` rebuilds the page from defaults instead.
    ///
    /// `Registered` is emitted for a new key or a changed label; any other
    /// change made by re-registration is reported like the matching command.
    pub fn register_page(
        &mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        state: PageState,
    ) {
        let key = key.into();
        let label = label.into();

        let Some(idx) = self.position(&key) else {
            let mut page = Page::new(key.clone(), label);
            page.apply(&state);
            self.pages.push(page);
            debug!("Registered page {:?} at position {}", key, self.pages.len() - 1);
            self.observers.emit(TrackerEvent::Registered(key));
            return;
        };

        let page = &mut self.pages[idx];
        let before = page.clone();
        if state.reset {
            *page = Page::new(key.clone(), label);
            page.current = before.current;
            page.visited = before.current;
            debug!("Reset page {:?} on registration", key);
        } else {
            page.label = label;
            page.rendered = true;
        }
        page.apply(&state);

        let after = page.clone();
        self.emit_changes(&before, &after);
    }

    /// Report the differences between two versions of one page
    fn emit_changes(&mut self, before: &Page, after: &Page) {
        let key = || after.key.clone();

        if before.label != after.label {
            self.observers.emit(TrackerEvent::Registered(key()));
        }
        if before.blocked != after.blocked {
            let event = if after.blocked {
                TrackerEvent::Blocked(key())
            } else {
                TrackerEvent::Unblocked(key())
            };
            self.observers.emit(event);
        }
        if before.done != after.done {
            let event = if after.done {
                TrackerEvent::Completed(key())
            } else if after.blocked && !before.blocked {
                TrackerEvent::CompletionRevoked(key())
            } else {
                TrackerEvent::Uncompleted(key())
            };
            self.observers.emit(event);
        }
        if before.dirty != after.dirty {
            let event = if after.dirty {
                TrackerEvent::Dirtied(key())
            } else {
                TrackerEvent::Cleaned(key())
            };
            self.observers.emit(event);
        }
        if before.rendered != after.rendered {
            let event = if after.rendered {
                TrackerEvent::Included(key())
            } else {
                TrackerEvent::Excluded(key())
            };
            self.observers.emit(event);
        }
    }

    /// Drop a page entirely
    pub fn unregister_page(&mut self, key: &str) {
        let Some(idx) = self.position(key) else {
            debug!("Ignoring unregister for unknown page {:?}", key);
            return;
        };

        let page = self.pages.remove(idx);
        self.observers.emit(TrackerEvent::Removed(page.key));
        if page.current {
            self.observers.emit(TrackerEvent::CurrentChanged(None));
        }
    }

    /// Mark a page done, unless it is blocked
    pub fn mark_complete(&mut self, key: &str) {
        let Some(page) = self.page_mut(key) else {
            return;
        };
        if page.blocked {
            debug!("Page {:?} is blocked, not marking complete", key);
            return;
        }
        if !page.done {
            page.done = true;
            self.observers.emit(TrackerEvent::Completed(key.to_string()));
        }
    }

    pub fn mark_incomplete(&mut self, key: &str) {
        let Some(page) = self.page_mut(key) else {
            return;
        };
        if page.done {
            page.done = false;
            self.observers.emit(TrackerEvent::Uncompleted(key.to_string()));
        }
    }

    pub fn mark_clean(&mut self, key: &str) {
        let Some(page) = self.page_mut(key) else {
            return;
        };
        if page.dirty {
            page.dirty = false;
            self.observers.emit(TrackerEvent::Cleaned(key.to_string()));
        }
    }

    pub fn mark_dirty(&mut self, key: &str) {
        let Some(page) = self.page_mut(key) else {
            return;
        };
        if !page.dirty {
            page.dirty = true;
            self.observers.emit(TrackerEvent::Dirtied(key.to_string()));
        }
    }

    /// Block a page. A done page loses its completion and must be
    /// re-validated after `unblock`.
    pub fn block(&mut self, key: &str) {
        let Some(page) = self.page_mut(key) else {
            return;
        };
        if page.blocked {
            return;
        }

        page.blocked = true;
        let revoked = std::mem::replace(&mut page.done, false);

        self.observers.emit(TrackerEvent::Blocked(key.to_string()));
        if revoked {
            debug!("Blocking page {:?} revoked its completion", key);
            self.observers.emit(TrackerEvent::CompletionRevoked(key.to_string()));
        }
    }

    /// Unblock a page. Completion is not restored.
    pub fn unblock(&mut self, key: &str) {
        let Some(page) = self.page_mut(key) else {
            return;
        };
        if page.blocked {
            page.blocked = false;
            self.observers.emit(TrackerEvent::Unblocked(key.to_string()));
        }
    }

    /// Make `key` the only current page and apply its on-view policies.
    /// An unknown key leaves no page current.
    pub fn set_current(&mut self, key: &str) {
        let target = self.position(key);
        let previous = self.pages.iter().position(|p| p.current);

        for (idx, page) in self.pages.iter_mut().enumerate() {
            page.current = Some(idx) == target;
        }

        let Some(idx) = target else {
            debug!("Current page {:?} is not registered, clearing current", key);
            if previous.is_some() {
                self.observers.emit(TrackerEvent::CurrentChanged(None));
            }
            return;
        };

        self.pages[idx].visited = true;
        if previous != target {
            self.observers
                .emit(TrackerEvent::CurrentChanged(Some(key.to_string())));
        }

        let (clean, complete) = {
            let page = &self.pages[idx];
            (page.mark_clean_on_view, page.mark_complete_on_view)
        };
        if clean {
            self.mark_clean(key);
        }
        if complete {
            self.mark_complete(key);
        }
    }

    /// Include or exclude a page from the active flow
    pub fn set_rendered(&mut self, key: &str, rendered: bool) {
        let Some(page) = self.page_mut(key) else {
            return;
        };
        if page.rendered == rendered {
            return;
        }

        page.rendered = rendered;
        let event = if rendered {
            TrackerEvent::Included(key.to_string())
        } else {
            TrackerEvent::Excluded(key.to_string())
        };
        self.observers.emit(event);
    }

    pub fn include_page(&mut self, key: &str) {
        self.set_rendered(key, true);
    }

    pub fn exclude_page(&mut self, key: &str) {
        self.set_rendered(key, false);
    }

    /// True when every required, rendered page is done
    pub fn is_complete(&self) -> bool {
        !self.pages.iter().any(Page::is_outstanding)
    }

    /// True when every rendered page has been current at least once
    pub fn all_pages_visited(&self) -> bool {
        self.rendered_pages().all(|p| p.visited)
    }

    /// `None` means the page has not been registered yet
    pub fn get_page(&self, key: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.key == key)
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn rendered_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|p| p.rendered)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.pages.iter().find(|p| p.current)
    }

    /// Next rendered page after the current one, or the first rendered page
    /// when nothing is current
    pub fn next_page(&self) -> Option<&str> {
        let start = match self.pages.iter().position(|p| p.current) {
            Some(idx) => idx + 1,
            None => 0,
        };
        self.pages[start..]
            .iter()
            .find(|p| p.rendered)
            .map(|p| p.key.as_str())
    }

    /// Previous rendered page before the current one
    pub fn previous_page(&self) -> Option<&str> {
        let idx = self.pages.iter().position(|p| p.current)?;
        self.pages[..idx]
            .iter()
            .rev()
            .find(|p| p.rendered)
            .map(|p| p.key.as_str())
    }

    /// Keys of required, rendered pages that are not done, in flow order
    pub fn incomplete_pages(&self) -> Vec<&str> {
        self.pages
            .iter()
            .filter(|p| p.is_outstanding())
            .map(|p| p.key.as_str())
            .collect()
    }

    pub fn summary(&self) -> TrackerSummary {
        let mut summary = TrackerSummary {
            total: self.pages.len(),
            complete: self.is_complete(),
            all_visited: self.all_pages_visited(),
            ..TrackerSummary::default()
        };

        for page in self.rendered_pages() {
            summary.rendered += 1;
            if page.required {
                summary.required += 1;
            }
            if page.done {
                summary.done += 1;
            }
            if page.visited {
                summary.visited += 1;
            }
        }

        summary
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.key == key)
    }

    fn page_mut(&mut self, key: &str) -> Option<&mut Page> {
        let page = self.pages.iter_mut().find(|p| p.key == key);
        if page.is_none() {
            debug!("Ignoring update for unknown page {:?}", key);
        }
        page
    }
}
