//! Error taxonomy for pbxfix
//!
//! Every failure is unrecoverable for a single invocation: the tool reports
//! the condition and terminates with a non-zero status. Structural problems
//! found inside the project file (nested duplicate references, duplicate
//! build files) are not errors at all; the reconciler corrects them and the
//! CLI reports them as warnings.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("project.pbxproj not found at {0}")]
    ProjectNotFound(PathBuf),

    #[error("group '{0}' not found in project")]
    GroupNotFound(String),

    #[error("target '{0}' not found in project")]
    TargetNotFound(String),

    #[error("target '{0}' has no resources build phase")]
    ResourcesPhaseNotFound(String),

    #[error("malformed project file: {0}")]
    Malformed(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Map an error to the process exit code the CLI should use.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::GroupNotFound(_)
            | Error::TargetNotFound(_)
            | Error::ResourcesPhaseNotFound(_) => exit_codes::LOOKUP_ERROR,
            Error::Config(_) | Error::Toml(_) => exit_codes::CONFIG_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

/// Exit codes for CLI commands
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const LOOKUP_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}
