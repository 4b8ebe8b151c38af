use thiserror::Error;

use crate::tracker::{PageState, WizardTracker};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Register {
        key: String,
        label: Option<String>,
        state: PageState,
    },
    Remove(String),
    Complete(String),
    Incomplete(String),
    Dirty(String),
    Clean(String),
    Block(String),
    Unblock(String),
    Show(String),
    Include(String),
    Exclude(String),
    Next,
    Back,
    Expect(Expectation),
    Status,
    Help,
    Quit,
}

/// Aggregate condition checked by `expect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Complete,
    Incomplete,
    Visited,
    Unvisited,
}

impl Expectation {
    pub fn name(&self) -> &'static str {
        match self {
            Expectation::Complete => "complete",
            Expectation::Incomplete => "incomplete",
            Expectation::Visited => "visited",
            Expectation::Unvisited => "unvisited",
        }
    }

    pub fn holds(&self, tracker: &WizardTracker) -> bool {
        match self {
            Expectation::Complete => tracker.is_complete(),
            Expectation::Incomplete => !tracker.is_complete(),
            Expectation::Visited => tracker.all_pages_visited(),
            Expectation::Unvisited => !tracker.all_pages_visited(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("{command} needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Unknown register flag: {0}")]
    UnknownFlag(String),

    #[error("Cannot split command: {0}")]
    Tokenize(String),

    #[error("Expected wizard to be {0}")]
    Expectation(&'static str),

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ScriptError>,
    },
}

impl ScriptError {
    pub fn at_line(self, line: usize) -> Self {
        ScriptError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

pub fn parse_command(input: &str) -> Result<Command, ScriptError> {
    let words = shell_words::split(input.trim()).map_err(|e| ScriptError::Tokenize(e.to_string()))?;
    let mut words = words.into_iter();
    let cmd = words.next().unwrap_or_default();

    match cmd.as_str() {
        "register" | "reg" => parse_register(words),
        "remove" | "rm" => Ok(Command::Remove(key_arg("remove", words.next())?)),
        "complete" | "done" => Ok(Command::Complete(key_arg("complete", words.next())?)),
        "incomplete" | "undone" => Ok(Command::Incomplete(key_arg("incomplete", words.next())?)),
        "dirty" => Ok(Command::Dirty(key_arg("dirty", words.next())?)),
        "clean" => Ok(Command::Clean(key_arg("clean", words.next())?)),
        "block" => Ok(Command::Block(key_arg("block", words.next())?)),
        "unblock" => Ok(Command::Unblock(key_arg("unblock", words.next())?)),
        "show" | "current" | "goto" => Ok(Command::Show(key_arg("show", words.next())?)),
        "include" => Ok(Command::Include(key_arg("include", words.next())?)),
        "exclude" => Ok(Command::Exclude(key_arg("exclude", words.next())?)),
        "next" | "n" => Ok(Command::Next),
        "back" | "prev" | "b" => Ok(Command::Back),
        "expect" => parse_expect(words.next()),
        "status" | "st" => Ok(Command::Status),
        "help" | "h" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" => Err(ScriptError::Unknown("empty command".to_string())),
        other => Err(ScriptError::Unknown(other.to_string())),
    }
}

fn key_arg(command: &'static str, arg: Option<String>) -> Result<String, ScriptError> {
    arg.ok_or(ScriptError::MissingArgument {
        command,
        argument: "page key",
    })
}

fn parse_register(mut words: impl Iterator<Item = String>) -> Result<Command, ScriptError> {
    let key = key_arg("register", words.next())?;
    let mut label = None;
    let mut state = PageState::new();

    while let Some(word) = words.next() {
        match word.as_str() {
            // Lets a label read like a flag: `register opt --label optional`
            "--label" if label.is_none() => {
                label = Some(words.next().ok_or(ScriptError::MissingArgument {
                    command: "register",
                    argument: "label",
                })?);
            }
            "required" => state.required = Some(true),
            "optional" => state.required = Some(false),
            "hidden" => state.rendered = Some(false),
            "reset" => state.reset = true,
            "complete-on-view" => state.mark_complete_on_view = Some(true),
            "keep-dirty" => state.mark_clean_on_view = Some(false),
            _ if label.is_none() => label = Some(word),
            _ => return Err(ScriptError::UnknownFlag(word)),
        }
    }

    Ok(Command::Register { key, label, state })
}

fn parse_expect(arg: Option<String>) -> Result<Command, ScriptError> {
    let expectation = match arg.as_deref() {
        Some("complete") => Expectation::Complete,
        Some("incomplete") => Expectation::Incomplete,
        Some("visited") => Expectation::Visited,
        Some("unvisited") => Expectation::Unvisited,
        Some(other) => return Err(ScriptError::Unknown(format!("expect {other}"))),
        None => {
            return Err(ScriptError::MissingArgument {
                command: "expect",
                argument: "condition",
            });
        }
    };
    Ok(Command::Expect(expectation))
}

impl Command {
    /// Run the command against a tracker. Only a failed `expect` is an error;
    /// unknown page keys are left to the tracker to ignore.
    pub fn apply(self, tracker: &mut WizardTracker) -> Result<(), ScriptError> {
        match self {
            Command::Register { key, label, state } => {
                let label = label.unwrap_or_else(|| key.clone());
                tracker.register_page(key, label, state);
            }
            Command::Remove(key) => tracker.unregister_page(&key),
            Command::Complete(key) => tracker.mark_complete(&key),
            Command::Incomplete(key) => tracker.mark_incomplete(&key),
            Command::Dirty(key) => tracker.mark_dirty(&key),
            Command::Clean(key) => tracker.mark_clean(&key),
            Command::Block(key) => tracker.block(&key),
            Command::Unblock(key) => tracker.unblock(&key),
            Command::Show(key) => tracker.set_current(&key),
            Command::Include(key) => tracker.include_page(&key),
            Command::Exclude(key) => tracker.exclude_page(&key),
            Command::Next => {
                if let Some(key) = tracker.next_page().map(str::to_string) {
                    tracker.set_current(&key);
                }
            }
            Command::Back => {
                if let Some(key) = tracker.previous_page().map(str::to_string) {
                    tracker.set_current(&key);
                }
            }
            Command::Expect(expectation) => {
                if !expectation.holds(tracker) {
                    return Err(ScriptError::Expectation(expectation.name()));
                }
            }
            Command::Status | Command::Help | Command::Quit => {}
        }
        Ok(())
    }
}
