//! Simulator error definitions.
//!
//! A single error enum covers everything the binaries can fail on: file
//! I/O around images and traces, malformed image words, and the runaway
//! execution cap. The SP architecture itself has no trap machinery, so
//! nothing in here is recoverable by the program under test.

use std::fmt;
use std::io;

/// Errors produced by the simulator library and its binaries.
#[derive(Debug)]
pub enum SpError {
    /// A file could not be opened, read, or written.
    Io {
        /// Path of the file involved.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A memory-image line did not parse as an 8-digit hex word.
    Image {
        /// Path of the image file.
        path: String,
        /// 1-based line number of the offending word.
        line: usize,
    },

    /// A configuration file did not parse.
    Config {
        /// Path of the config file.
        path: String,
        /// Parser message.
        message: String,
    },

    /// The simulation exceeded the configured cycle cap without halting.
    CycleLimit {
        /// The cap that was exceeded.
        cap: u64,
    },
}

impl SpError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: &str, source: io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }
}

impl fmt::Display for SpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpError::Io { path, source } => write!(f, "{}: {}", path, source),
            SpError::Image { path, line } => {
                write!(f, "{}: line {}: malformed memory-image word", path, line)
            }
            SpError::Config { path, message } => write!(f, "{}: {}", path, message),
            SpError::CycleLimit { cap } => {
                write!(f, "no HLT within {} cycles, aborting", cap)
            }
        }
    }
}

impl std::error::Error for SpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
