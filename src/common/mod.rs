//! Common utilities and types used throughout the SP simulator.
//!
//! This module provides the error type shared by the library and the
//! binaries, and the architectural register file.

/// Error types for image loading, trace output, and simulation limits.
pub mod error;

/// Architectural register file implementation.
pub mod reg;

pub use error::SpError;
pub use reg::RegisterFile;
