//! Memory subsystem.
//!
//! SP has two independent single-ported SRAMs: `srami` for instruction
//! fetch and `sramd` for data. Both are 64Ki x 32 bits with a one-cycle
//! read latency modeled through explicit request/response records.

/// Single-ported SRAM with one-cycle read latency.
pub mod sram;

pub use sram::{Sram, SRAM_WORDS};
