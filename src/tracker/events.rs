use tokio::sync::mpsc;

/// State change reported to tracker observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    Registered(String),
    Removed(String),
    Completed(String),
    Uncompleted(String),
    /// `block` cleared the page's completion; the caller must re-validate it
    CompletionRevoked(String),
    Dirtied(String),
    Cleaned(String),
    Blocked(String),
    Unblocked(String),
    CurrentChanged(Option<String>),
    Included(String),
    Excluded(String),
}

impl TrackerEvent {
    /// Key of the page the event concerns, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            TrackerEvent::Registered(key)
            | TrackerEvent::Removed(key)
            | TrackerEvent::Completed(key)
            | TrackerEvent::Uncompleted(key)
            | TrackerEvent::CompletionRevoked(key)
            | TrackerEvent::Dirtied(key)
            | TrackerEvent::Cleaned(key)
            | TrackerEvent::Blocked(key)
            | TrackerEvent::Unblocked(key)
            | TrackerEvent::Included(key)
            | TrackerEvent::Excluded(key) => Some(key),
            TrackerEvent::CurrentChanged(key) => key.as_deref(),
        }
    }
}

/// Fan-out of tracker events to any number of receivers
#[derive(Debug, Default)]
pub(crate) struct Observers {
    senders: Vec<mpsc::UnboundedSender<TrackerEvent>>,
}

impl Observers {
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<TrackerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.push(tx);
        rx
    }

    pub fn emit(&mut self, event: TrackerEvent) {
        if self.senders.is_empty() {
            return;
        }
        // Dropped receivers are pruned on the next send
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.senders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let mut observers = Observers::default();
        let mut a = observers.subscribe();
        let mut b = observers.subscribe();

        observers.emit(TrackerEvent::Completed("review".to_string()));

        assert_eq!(a.try_recv().ok(), Some(TrackerEvent::Completed("review".to_string())));
        assert_eq!(b.try_recv().ok(), Some(TrackerEvent::Completed("review".to_string())));
    }

    #[test]
    fn test_closed_receivers_are_pruned() {
        let mut observers = Observers::default();
        let rx = observers.subscribe();
        let _keep = observers.subscribe();
        drop(rx);

        observers.emit(TrackerEvent::CurrentChanged(None));
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn test_event_key() {
        assert_eq!(TrackerEvent::Blocked("a".to_string()).key(), Some("a"));
        assert_eq!(TrackerEvent::CurrentChanged(None).key(), None);
    }
}
