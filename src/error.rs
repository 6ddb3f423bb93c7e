//! Error taxonomy for input assembly, invocation, and rendering.
//!
//! Flag errors never reach this enum: clap reports them and exits on
//! its own. Everything else propagates straight to `main` untouched.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The messages file could not be read at all.
    #[error("failed to read messages file {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON that failed to decode from a messages file, or a response
    /// envelope that failed to re-serialize for `--json` output.
    #[error("malformed JSON in {what}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// A remote call failed. Auth, network, and rate-limit causes all
    /// land here; callers do not distinguish them further.
    #[error("{operation} request failed: {message}")]
    Invocation {
        operation: &'static str,
        message: String,
    },
}

impl Error {
    pub(crate) fn invocation(operation: &'static str, cause: impl std::fmt::Display) -> Self {
        Error::Invocation {
            operation,
            message: cause.to_string(),
        }
    }
}
