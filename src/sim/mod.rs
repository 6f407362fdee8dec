//! Simulation harness and loaders.
//!
//! Drives the pipelined core cycle by cycle under the runaway cap, and
//! hosts the memory-image loader and the functional reference interpreter.

/// Functional reference interpreter (the testing oracle).
pub mod iss;

/// Hex memory-image loading and dumping.
pub mod loader;

use crate::common::SpError;
use crate::core::Cpu;

/// Runs the core until HLT commits.
///
/// Returns `CycleLimit` if the cap is reached first; the caller maps that
/// to its own exit code.
pub fn run(cpu: &mut Cpu, max_cycles: u64) -> Result<(), SpError> {
    while !cpu.halted {
        if cpu.curr.cycle >= max_cycles {
            return Err(SpError::CycleLimit { cap: max_cycles });
        }
        cpu.tick()?;
    }
    Ok(())
}
