pub mod config;
pub mod console;
pub mod error;
pub mod event;
pub mod script;
pub mod tracker;
pub mod ui;

pub use config::WizardConfig;
pub use error::{Result, WizardError};
pub use tracker::{Page, PageState, PageStatus, TrackerEvent, TrackerSummary, WizardTracker};
