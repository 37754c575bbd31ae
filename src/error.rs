//! Error types for the fallible edges of the crate.
//!
//! Resolution itself never fails. Path and selector errors are swallowed
//! (and logged) where they occur; only configuration loading hands an error
//! back to the caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("invalid source path `{path}`: {message}")]
    Syntax { path: String, message: String },
}

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("invalid selector `{selector}`: {message}")]
    Syntax { selector: String, message: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    #[error("invalid fixture: {0}")]
    Fixture(String),
    #[error("no value named `{0}` in the configuration")]
    UnknownValue(String),
}
