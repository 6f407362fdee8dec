//! SP core implementation.
//!
//! The core is two interacting state machines: the 6-stage in-order
//! pipeline and the DMA engine beside it. Both are driven from a single
//! synchronous cycle driver in [`cpu`].

/// State container and cycle driver.
pub mod cpu;

/// Pipeline latches and the hazard unit.
pub mod pipeline;

/// Stage implementations, oldest to youngest.
pub mod stages;

/// Shared execution units (ALU, DMA engine).
pub mod units;

pub use cpu::Cpu;
