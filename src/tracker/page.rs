/// One step of a wizard, identified by a stable key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub key: String,
    pub label: String,
    /// Counts toward overall completeness
    pub required: bool,
    /// Content currently satisfies validation
    pub done: bool,
    /// Modified since last marked clean
    pub dirty: bool,
    /// Waiting on an external precondition, cannot be marked done
    pub blocked: bool,
    /// Participates in the active flow
    pub rendered: bool,
    /// Currently in view
    pub current: bool,
    /// Has been current at least once this session
    pub visited: bool,
    /// Clear `dirty` when the page comes into view
    pub mark_clean_on_view: bool,
    /// Mark the page done when it comes into view
    pub mark_complete_on_view: bool,
}

impl Page {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            required: false,
            done: false,
            dirty: false,
            blocked: false,
            rendered: true,
            current: false,
            visited: false,
            mark_clean_on_view: true,
            mark_complete_on_view: false,
        }
    }

    /// Derived status used for completion indicators
    pub fn status(&self) -> PageStatus {
        if !self.rendered {
            PageStatus::Hidden
        } else if self.blocked {
            PageStatus::Blocked
        } else if self.done && self.dirty {
            PageStatus::Dirty
        } else if self.done {
            PageStatus::Done
        } else {
            PageStatus::Pending
        }
    }

    /// Whether this page holds up submission
    pub fn is_outstanding(&self) -> bool {
        self.required && self.rendered && !self.done
    }

    /// Overlay the `Some` fields of a registration state
    pub(crate) fn apply(&mut self, state: &PageState) {
        if let Some(required) = state.required {
            self.required = required;
        }
        if let Some(done) = state.done {
            self.done = done;
        }
        if let Some(dirty) = state.dirty {
            self.dirty = dirty;
        }
        if let Some(blocked) = state.blocked {
            self.blocked = blocked;
        }
        if let Some(rendered) = state.rendered {
            self.rendered = rendered;
        }
        if let Some(clean) = state.mark_clean_on_view {
            self.mark_clean_on_view = clean;
        }
        if let Some(complete) = state.mark_complete_on_view {
            self.mark_complete_on_view = complete;
        }

        if self.blocked {
            self.done = false;
        }
    }
}

/// Initial state passed to `register_page`.
///
/// Unset fields leave the existing page (or the defaults, for a new key)
/// untouched. `reset` rebuilds the page from defaults instead of merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub required: Option<bool>,
    pub done: Option<bool>,
    pub dirty: Option<bool>,
    pub blocked: Option<bool>,
    pub rendered: Option<bool>,
    pub mark_clean_on_view: Option<bool>,
    pub mark_complete_on_view: Option<bool>,
    pub reset: bool,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any prior state for the key on registration
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    pub fn dirty(mut self, dirty: bool) -> Self {
        self.dirty = Some(dirty);
        self
    }

    pub fn blocked(mut self, blocked: bool) -> Self {
        self.blocked = Some(blocked);
        self
    }

    pub fn rendered(mut self, rendered: bool) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn mark_clean_on_view(mut self, enabled: bool) -> Self {
        self.mark_clean_on_view = Some(enabled);
        self
    }

    pub fn mark_complete_on_view(mut self, enabled: bool) -> Self {
        self.mark_complete_on_view = Some(enabled);
        self
    }
}

/// Completion indicator for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Pending,
    Done,
    /// Done but modified since, needs another look
    Dirty,
    Blocked,
    Hidden,
}

impl PageStatus {
    pub fn marker(&self) -> &'static str {
        match self {
            PageStatus::Pending => "[ ]",
            PageStatus::Done => "[x]",
            PageStatus::Dirty => "[~]",
            PageStatus::Blocked => "[#]",
            PageStatus::Hidden => "[-]",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PageStatus::Pending => "pending",
            PageStatus::Done => "done",
            PageStatus::Dirty => "needs review",
            PageStatus::Blocked => "blocked",
            PageStatus::Hidden => "hidden",
        }
    }
}
