//! Execution units shared across the core.

/// Integer ALU shared by exec0 and the hazard unit.
pub mod alu;

/// Background DMA copy engine.
pub mod dma;
