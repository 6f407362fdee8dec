//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for detecting data hazards in the
//! pipeline and resolving them through register forwarding or a load-use
//! stall, and resolves control hazards by computing the branch outcome of
//! the instruction in exec0.
//!
//! Everything here is a pure function of the committed snapshot plus the
//! data-memory response sampled this cycle, evaluated before the next
//! snapshot's younger latches are assembled.

use crate::core::pipeline::latches::PipeRegs;
use crate::core::units::alu::Alu;
use crate::isa::Opcode;
use crate::mem::Sram;

/// Hazard and control signals for one cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct HazardSignals {
    /// Freeze fetch0..dec1 and insert a bubble into exec0.
    pub stall: bool,
    /// Squash the two younger instructions and the dec1 latch output.
    pub flush: bool,
    /// The instruction in exec0 is a taken branch.
    pub branch_taken: bool,
    /// Redirect target for fetch0.
    pub branch_target: u16,
    /// Forwarded value for the dec1 src0 consumer slot.
    pub fwd_alu0: Option<u32>,
    /// Forwarded value for the dec1 src1 consumer slot.
    pub fwd_alu1: Option<u32>,
}

/// Evaluates a branch condition on executed operands.
///
/// Conditional compares are signed; JIN is always taken. Every other
/// opcode returns false.
pub fn branch_taken(op: Opcode, a: u32, b: u32) -> bool {
    match op {
        Opcode::Jlt => (a as i32) < (b as i32),
        Opcode::Jle => (a as i32) <= (b as i32),
        Opcode::Jeq => a == b,
        Opcode::Jne => a != b,
        Opcode::Jin => true,
        _ => false,
    }
}

/// Runs hazard detection over the committed snapshot.
///
/// Forwarding serves the dec1 consumer slots (`src0`, `src1`) that name
/// r2..r7, in two priority tiers:
///
/// 1. **exec1 -> dec1**: the oldest in-flight producer. ALU, LHI and
///    DMA_STATUS forward `aluout`; LD forwards the word on `sramd.dataout`,
///    which carries the load response during the producer's exec1 cycle.
/// 2. **exec0 -> dec1**: only for ops whose result exists combinationally.
///    The committed `aluout` of exec0 is not final yet, so the result is
///    recomputed with the same shared ALU the execute stage uses.
///
/// A load in exec0 whose dst matches a consumer slot has no value to
/// forward and raises `stall` instead.
pub fn detect(curr: &PipeRegs, sramd: &Sram, trace: bool) -> HazardSignals {
    let mut hz = HazardSignals::default();

    if curr.dec1.active {
        // Forward from exec1 -- priority 1. For LD the value is on the
        // dataout port this cycle.
        if curr.exec1.active && curr.exec1.dst >= 2 {
            let fwd = match curr.exec1.opcode {
                Opcode::Ld => Some(sramd.dataout()),
                op if op.writes_aluout() => Some(curr.exec1.aluout),
                _ => None,
            };
            if let Some(val) = fwd {
                if curr.exec1.dst == curr.dec1.src0 {
                    hz.fwd_alu0 = Some(val);
                }
                if curr.exec1.dst == curr.dec1.src1 {
                    hz.fwd_alu1 = Some(val);
                }
            }
        }

        // Forward from exec0 -- priority 2, combinational results only.
        if curr.exec0.active && curr.exec0.dst >= 2 {
            let recomputed = match curr.exec0.opcode {
                Opcode::DmaStatus => Some(curr.dma.busy as u32),
                op => Alu::execute(op, curr.exec0.alu0, curr.exec0.alu1, curr.exec0.imm),
            };
            if let Some(val) = recomputed {
                if hz.fwd_alu0.is_none() && curr.exec0.dst == curr.dec1.src0 {
                    hz.fwd_alu0 = Some(val);
                }
                if hz.fwd_alu1.is_none() && curr.exec0.dst == curr.dec1.src1 {
                    hz.fwd_alu1 = Some(val);
                }
            }
        }

        // Load-use: the producer LD in exec0 has no data yet.
        if curr.exec0.active && curr.exec0.opcode == Opcode::Ld && curr.exec0.dst >= 2 {
            if curr.exec0.dst == curr.dec1.src0 || curr.exec0.dst == curr.dec1.src1 {
                hz.stall = true;
            }
        }

        if trace {
            if let Some(val) = hz.fwd_alu0 {
                eprintln!(
                    "[forward] pc={} src0=r{} <= {:#010x}",
                    curr.dec1.pc, curr.dec1.src0, val
                );
            }
            if let Some(val) = hz.fwd_alu1 {
                eprintln!(
                    "[forward] pc={} src1=r{} <= {:#010x}",
                    curr.dec1.pc, curr.dec1.src1, val
                );
            }
        }
    }

    // Control hazard: branches resolve in exec0. A stall never coincides
    // with a flush because exec0 cannot hold both an LD and a branch.
    if curr.exec0.active && branch_taken(curr.exec0.opcode, curr.exec0.alu0, curr.exec0.alu1) {
        hz.branch_taken = true;
        hz.branch_target = if curr.exec0.opcode == Opcode::Jin {
            (curr.exec0.alu0 & 0xffff) as u16
        } else {
            (curr.exec0.imm & 0xffff) as u16
        };
        hz.flush = true;
    }

    hz
}
