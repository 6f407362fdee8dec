//! Decode stages: field extraction and operand formation.

use crate::common::RegisterFile;
use crate::core::pipeline::hazards::HazardSignals;
use crate::core::pipeline::latches::{Dec1, Exec0};
use crate::core::Cpu;
use crate::isa::{Instruction, Opcode};

/// Forms the two execute operands for an instruction.
///
/// The generic rule resolves each source selector through the register
/// file's immediate alias (0 -> 0, 1 -> imm, 2..7 -> R[s]). The
/// per-opcode cases redirect which selector feeds which operand:
///
/// * LD: `alu0` unused, `alu1` is the address from src1.
/// * ST: `alu0` is the store data from src0, `alu1` the address from src1.
/// * JIN and LHI: `alu0` comes from the dst selector (jump target, or the
///   low half to preserve); `alu1` is unused.
fn form_operands(
    opcode: Opcode,
    dst: usize,
    src0: usize,
    src1: usize,
    imm: u32,
    r: &RegisterFile,
) -> (u32, u32) {
    match opcode {
        Opcode::Ld => (0, r.operand(src1, imm)),
        Opcode::Jin | Opcode::Lhi => (r.operand(dst, imm), 0),
        _ => (r.operand(src0, imm), r.operand(src1, imm)),
    }
}

/// dec1: re-forms operands against the committed register file, applies
/// forwarding, and latches into exec0.
///
/// A stall turns the exec0 input into a bubble while dec1 itself stays
/// frozen; a flush squashes the latch output. Forwarded values replace only
/// the operands actually sourced from the src0/src1 consumer slots -- the
/// dst-read operands of JIN and LHI are architecturally unforwarded.
pub fn dec1_stage(cpu: &mut Cpu, hz: &HazardSignals) {
    if hz.stall || hz.flush {
        cpu.next.exec0.active = false;
        return;
    }

    let d = &cpu.curr.dec1;
    let (mut alu0, mut alu1) = form_operands(d.opcode, d.dst, d.src0, d.src1, d.imm, &cpu.curr.r);

    match d.opcode {
        Opcode::Jin | Opcode::Lhi => {}
        Opcode::Ld => {
            if let Some(val) = hz.fwd_alu1 {
                alu1 = val;
            }
        }
        _ => {
            if let Some(val) = hz.fwd_alu0 {
                alu0 = val;
            }
            if let Some(val) = hz.fwd_alu1 {
                alu1 = val;
            }
        }
    }

    cpu.next.exec0 = Exec0 {
        active: d.active,
        pc: d.pc,
        inst: d.inst,
        opcode: d.opcode,
        dst: d.dst,
        src0: d.src0,
        src1: d.src1,
        imm: d.imm,
        alu0,
        alu1,
    };
}

/// dec0: extracts the instruction fields and reads provisional operands.
///
/// The operand values read here may be stale; dec1 re-forms them next cycle
/// once this cycle's writeback has landed and forwarding is known.
pub fn dec0_stage(cpu: &mut Cpu, hz: &HazardSignals) {
    if hz.stall {
        return;
    }
    if hz.flush {
        cpu.next.dec1.active = false;
        return;
    }

    let d = &cpu.curr.dec0;
    let inst = Instruction::decode(d.inst);
    let imm = inst.simm();
    let (alu0, alu1) = form_operands(inst.opcode, inst.dst, inst.src0, inst.src1, imm, &cpu.curr.r);

    cpu.next.dec1 = Dec1 {
        active: d.active,
        pc: d.pc,
        inst: d.inst,
        opcode: inst.opcode,
        dst: inst.dst,
        src0: inst.src0,
        src1: inst.src1,
        imm,
        alu0,
        alu1,
    };
}
