//! Audio splitting through mkvmerge.

mod args;
mod runner;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use args::{delay_from_filename, identify_args, parse_audio_track_id, SplitPlan, TrackSync};
pub use runner::Mkvmerge;

/// Errors from planning or running a split.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("nothing to keep: the cut has no parts")]
    NoParts,

    #[error("executable not found: {0}")]
    ToolNotFound(String),

    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("output file already exists: {0}")]
    OutputExists(PathBuf),

    #[error("mkvmerge failed with exit code {exit_code}: {message}")]
    CommandFailed { exit_code: i32, message: String },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    pub fn command_failed(exit_code: i32, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            exit_code,
            message: message.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type SplitResult<T> = Result<T, SplitError>;
