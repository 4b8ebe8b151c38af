use crossterm::event::{self, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Polls the terminal on a dedicated thread and forwards events to the
/// async console loop. A tick is sent whenever `tick_rate` passes quietly.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        std::thread::spawn(move || {
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        // Release events would double every keystroke on some terminals
                        Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                        Ok(event::Event::Resize(_, _)) => Event::Resize,
                        _ => continue,
                    }
                } else {
                    Event::Tick
                };

                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
