use deck_wizard::{PageState, TrackerEvent, WizardTracker};

fn required() -> PageState {
    PageState::new().required(true)
}

#[test]
fn two_required_pages_complete_in_turn() {
    let mut tracker = WizardTracker::new();
    tracker.register_page("location", "Location", required());
    tracker.register_page("review", "Review", required());
    assert!(!tracker.is_complete());

    tracker.mark_complete("location");
    assert!(!tracker.is_complete());

    tracker.mark_complete("review");
    assert!(tracker.is_complete());
}

#[test]
fn optional_page_never_blocks_submission() {
    let mut tracker = WizardTracker::new();
    tracker.register_page("location", "Location", required());
    tracker.register_page("advanced", "Advanced", PageState::new().required(false));

    tracker.mark_complete("location");
    assert!(tracker.is_complete());
    assert!(!tracker.get_page("advanced").unwrap().done);
}

#[test]
fn blocking_is_destructive_to_completion() {
    let mut tracker = WizardTracker::new();
    tracker.register_page("loc", "Location", required());
    let mut events = tracker.subscribe();

    tracker.mark_complete("loc");
    tracker.block("loc");
    assert!(!tracker.get_page("loc").unwrap().done);

    tracker.unblock("loc");
    assert!(!tracker.get_page("loc").unwrap().done);

    let mut revoked = 0;
    while let Ok(event) = events.try_recv() {
        if event == TrackerEvent::CompletionRevoked("loc".to_string()) {
            revoked += 1;
        }
    }
    assert_eq!(revoked, 1);
}

#[test]
fn revisiting_pages_counts_each_once() {
    let mut tracker = WizardTracker::new();
    tracker.register_page("a", "A", PageState::new());
    tracker.register_page("b", "B", PageState::new());

    tracker.set_current("a");
    tracker.set_current("b");
    tracker.set_current("a");

    assert!(tracker.all_pages_visited());
    assert_eq!(tracker.summary().visited, 2);
}

#[test]
fn hiding_incomplete_required_page_completes_wizard() {
    let mut tracker = WizardTracker::new();
    tracker.register_page("a", "A", required());
    tracker.register_page("c", "C", required());
    tracker.mark_complete("a");

    tracker.set_rendered("c", false);
    assert!(tracker.is_complete());

    tracker.set_rendered("c", true);
    assert!(!tracker.is_complete());
}

#[test]
fn remount_keeps_progress_unless_reset() {
    let mut tracker = WizardTracker::new();
    tracker.register_page("capacity", "Capacity", required());
    tracker.mark_complete("capacity");
    tracker.mark_dirty("capacity");

    // Unmount, then mount again
    tracker.set_rendered("capacity", false);
    tracker.register_page("capacity", "Capacity", PageState::new());
    let page = tracker.get_page("capacity").unwrap();
    assert!(page.done && page.dirty && page.rendered);

    tracker.register_page("capacity", "Capacity", PageState::reset().required(true));
    let page = tracker.get_page("capacity").unwrap();
    assert!(!page.done && !page.dirty && page.required);
}

#[test]
fn unknown_keys_are_ignored() {
    let mut tracker = WizardTracker::new();
    tracker.register_page("a", "A", required());
    tracker.set_current("a");
    tracker.mark_complete("a");

    tracker.mark_complete("ghost");
    tracker.mark_incomplete("ghost");
    tracker.block("ghost");
    tracker.unblock("ghost");

    let page = tracker.get_page("a").unwrap();
    assert!(page.done && page.current && !page.blocked);
    assert!(tracker.get_page("ghost").is_none());

    tracker.set_current("ghost");
    assert!(tracker.current_page().is_none());
    assert!(tracker.get_page("a").unwrap().visited);
}

#[test]
fn done_never_coexists_with_blocked() {
    let mut tracker = WizardTracker::new();
    for key in ["a", "b", "c"] {
        tracker.register_page(key, key, PageState::new().mark_complete_on_view(true));
    }

    tracker.block("b");
    tracker.set_current("b");
    tracker.mark_complete("b");
    tracker.set_current("a");
    tracker.block("a");
    tracker.register_page("c", "c", PageState::new().done(true).blocked(true));

    for page in tracker.pages() {
        assert!(!(page.done && page.blocked), "{} is done while blocked", page.key);
    }
}
