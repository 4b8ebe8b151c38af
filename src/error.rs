use thiserror::Error;

use crate::script::ScriptError;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, WizardError>;
