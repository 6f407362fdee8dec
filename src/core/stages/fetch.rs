//! Fetch stages: pc generation, fetch issue, and word sampling.

use crate::core::pipeline::hazards::HazardSignals;
use crate::core::pipeline::latches::{Dec0, Fetch0, Fetch1};
use crate::core::Cpu;

/// fetch0: issues the `srami` read for the current pc and advances it.
///
/// Prediction is predict-not-taken: the pc increments every cycle unless a
/// taken branch resolved in exec0 this cycle, in which case the next pc is
/// the branch target and the in-flight fetch1 slot is squashed. On stall
/// the latch freezes and no new read is issued.
pub fn fetch0_stage(cpu: &mut Cpu, hz: &HazardSignals) {
    if hz.stall {
        return;
    }

    if hz.flush {
        cpu.next.fetch1.active = false;
    } else {
        cpu.next.fetch1 = Fetch1 {
            active: cpu.curr.fetch0.active,
            pc: cpu.curr.fetch0.pc,
        };
    }

    if cpu.curr.fetch0.active {
        cpu.srami.read(cpu.curr.fetch0.pc as u32);
    }

    let next_pc = if hz.branch_taken {
        hz.branch_target
    } else {
        cpu.curr.fetch0.pc.wrapping_add(1)
    };
    cpu.next.fetch0 = Fetch0 {
        active: true,
        pc: next_pc,
    };
}

/// fetch1: pairs the word returned on `srami.dataout` with its pc.
///
/// The response to the read issued while the instruction occupied fetch0
/// arrives exactly one cycle later, so it is latched here together with the
/// pc carried through fetch1. The pairing is exact because `srami` is never
/// written during execution.
pub fn fetch1_stage(cpu: &mut Cpu, hz: &HazardSignals) {
    if hz.stall {
        return;
    }
    if hz.flush {
        cpu.next.dec0.active = false;
        return;
    }
    cpu.next.dec0 = Dec0 {
        active: cpu.curr.fetch1.active,
        pc: cpu.curr.fetch1.pc,
        inst: cpu.srami.dataout(),
    };
}
