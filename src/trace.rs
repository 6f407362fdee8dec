//! Instruction-level and cycle-level trace emission.
//!
//! The instruction trace carries one block per committed instruction,
//! written at exec1 before the commit so the register snapshot shows the
//! pre-writeback state. The EXEC line renders the effect with the operand
//! values the ALU actually consumed (after forwarding), not the committed
//! register file. The cycle trace dumps every latch field once per cycle in
//! a fixed order. Both outputs are deterministic for a given image.

use std::io::{self, Write};

use crate::core::pipeline::latches::{Exec1, PipeRegs};
use crate::isa::{Instruction, Opcode};

const RULE: &str = "-----------------------------------------------------------";

/// Trace sink for a simulation run.
///
/// Either writer may be absent; tests typically run with both disabled.
/// The instruction counter feeds the block headers and the final HLT
/// summary line.
pub struct Tracer {
    inst: Option<Box<dyn Write>>,
    cycle: Option<Box<dyn Write>>,
    emitted: u32,
}

impl Tracer {
    /// A tracer writing to the given sinks.
    pub fn new(inst: Option<Box<dyn Write>>, cycle: Option<Box<dyn Write>>) -> Self {
        Self {
            inst,
            cycle,
            emitted: 0,
        }
    }

    /// A tracer that discards everything (still counts instructions).
    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    /// Number of instruction blocks emitted so far.
    pub fn instructions_emitted(&self) -> u32 {
        self.emitted
    }

    /// Emits one committed-instruction block.
    ///
    /// `regs` is the pre-commit register snapshot; `load_value` is the word
    /// on `sramd.dataout` this cycle (meaningful for LD).
    pub fn instruction(&mut self, wb: &Exec1, regs: [u32; 8], load_value: u32) -> io::Result<()> {
        let n = self.emitted;
        self.emitted += 1;

        let w = match self.inst.as_mut() {
            Some(w) => w,
            None => return Ok(()),
        };

        let inst = Instruction::decode(wb.inst);
        let op = inst.opcode;
        let pc = wb.pc;

        writeln!(w, "--- instruction {} ({:04x}) @ PC {} ({:04x}) {}", n, n, pc, pc, RULE)?;
        writeln!(
            w,
            "pc = {:04}, inst = {:08x}, opcode = {} ({}), dst = {}, src0 = {}, src1 = {}, immediate = {:08x}",
            pc,
            wb.inst,
            (wb.inst >> 25) & 0x1f,
            op.mnemonic(),
            inst.dst,
            inst.src0,
            inst.src1,
            inst.imm16
        )?;

        // r[1] renders as the instruction's own immediate whenever a source
        // slot selects it or the instruction is a branch.
        let mut shown = regs;
        if inst.src0 == 1 || inst.src1 == 1 || op.is_branch() {
            shown[1] = inst.simm();
        }
        writeln!(
            w,
            "r[0] = {:08x} r[1] = {:08x} r[2] = {:08x} r[3] = {:08x} ",
            shown[0], shown[1], shown[2], shown[3]
        )?;
        writeln!(
            w,
            "r[4] = {:08x} r[5] = {:08x} r[6] = {:08x} r[7] = {:08x} \n",
            shown[4], shown[5], shown[6], shown[7]
        )?;

        let a = wb.alu0 as i32;
        let b = wb.alu1 as i32;
        match op {
            o if o.is_alu() => {
                writeln!(
                    w,
                    ">>>> EXEC: R[{}] = {} {} {} <<<<\n",
                    inst.dst,
                    a,
                    o.mnemonic(),
                    b
                )?;
            }
            Opcode::Lhi => {
                writeln!(
                    w,
                    ">>>> EXEC: R[{}] = (0x{:04x} << 16) | (R[{}] & 0xFFFF) <<<<\n",
                    inst.dst, inst.imm16, inst.dst
                )?;
            }
            Opcode::Ld => {
                writeln!(
                    w,
                    ">>>> EXEC: R[{}] = MEM[{}] = {:08x} <<<<\n",
                    inst.dst, b, load_value
                )?;
            }
            Opcode::St => {
                writeln!(
                    w,
                    ">>>> EXEC: MEM[{}] = R[{}] = {:08x} <<<<\n",
                    b, inst.src0, wb.alu0
                )?;
            }
            o if o.is_cond_branch() => {
                let taken = crate::core::pipeline::hazards::branch_taken(o, wb.alu0, wb.alu1);
                let next_pc = if taken {
                    inst.imm16 as u32
                } else {
                    (pc.wrapping_add(1)) as u32
                };
                writeln!(
                    w,
                    ">>>> EXEC: {} {}, {}, {} <<<<\n",
                    o.mnemonic(),
                    a,
                    b,
                    next_pc
                )?;
            }
            Opcode::Jin => {
                writeln!(
                    w,
                    ">>>> EXEC: JIN {}, {}, {} <<<<\n",
                    regs[inst.src0] as i32,
                    regs[inst.src1] as i32,
                    wb.alu0 & 0xffff
                )?;
            }
            Opcode::DmaStart => {
                writeln!(
                    w,
                    ">>>> EXEC: DMA START {} -> {}, len {} <<<<\n",
                    wb.alu0 & 0xffff,
                    wb.alu1 & 0xffff,
                    inst.imm16
                )?;
            }
            Opcode::DmaStatus => {
                writeln!(
                    w,
                    ">>>> EXEC: R[{}] = DMA STATUS = {} <<<<\n",
                    inst.dst, wb.aluout
                )?;
            }
            Opcode::Hlt => {
                writeln!(w, ">>>> EXEC: HALT at PC {:04x}<<<<", pc)?;
                write!(w, "sim finished at pc {}, {} instructions", pc, n + 1)?;
            }
            _ => {
                writeln!(w, ">>>> EXEC: (unknown) <<<<\n")?;
            }
        }
        w.flush()
    }

    /// Emits one cycle block dumping the committed snapshot.
    pub fn cycle_block(&mut self, s: &PipeRegs) -> io::Result<()> {
        let w = match self.cycle.as_mut() {
            Some(w) => w,
            None => return Ok(()),
        };
        let r = s.r.snapshot();

        writeln!(w, "cycle {}", s.cycle)?;
        writeln!(w, "cycle_counter {:08x}", s.cycle)?;
        for (i, val) in r.iter().enumerate().skip(2) {
            writeln!(w, "r{} {:08x}", i, val)?;
        }

        writeln!(w, "fetch0_active {:08x}", s.fetch0.active as u32)?;
        writeln!(w, "fetch0_pc {:08x}", s.fetch0.pc)?;

        writeln!(w, "fetch1_active {:08x}", s.fetch1.active as u32)?;
        writeln!(w, "fetch1_pc {:08x}", s.fetch1.pc)?;

        writeln!(w, "dec0_active {:08x}", s.dec0.active as u32)?;
        writeln!(w, "dec0_pc {:08x}", s.dec0.pc)?;
        writeln!(w, "dec0_inst {:08x}", s.dec0.inst)?;

        writeln!(w, "dec1_active {:08x}", s.dec1.active as u32)?;
        writeln!(w, "dec1_pc {:08x}", s.dec1.pc)?;
        writeln!(w, "dec1_inst {:08x}", s.dec1.inst)?;
        writeln!(w, "dec1_opcode {:08x}", (s.dec1.inst >> 25) & 0x1f)?;
        writeln!(w, "dec1_src0 {:08x}", s.dec1.src0)?;
        writeln!(w, "dec1_src1 {:08x}", s.dec1.src1)?;
        writeln!(w, "dec1_dst {:08x}", s.dec1.dst)?;
        writeln!(w, "dec1_immediate {:08x}", s.dec1.imm)?;

        writeln!(w, "exec0_active {:08x}", s.exec0.active as u32)?;
        writeln!(w, "exec0_pc {:08x}", s.exec0.pc)?;
        writeln!(w, "exec0_inst {:08x}", s.exec0.inst)?;
        writeln!(w, "exec0_opcode {:08x}", (s.exec0.inst >> 25) & 0x1f)?;
        writeln!(w, "exec0_src0 {:08x}", s.exec0.src0)?;
        writeln!(w, "exec0_src1 {:08x}", s.exec0.src1)?;
        writeln!(w, "exec0_dst {:08x}", s.exec0.dst)?;
        writeln!(w, "exec0_immediate {:08x}", s.exec0.imm)?;
        writeln!(w, "exec0_alu0 {:08x}", s.exec0.alu0)?;
        writeln!(w, "exec0_alu1 {:08x}", s.exec0.alu1)?;

        writeln!(w, "exec1_active {:08x}", s.exec1.active as u32)?;
        writeln!(w, "exec1_pc {:08x}", s.exec1.pc)?;
        writeln!(w, "exec1_inst {:08x}", s.exec1.inst)?;
        writeln!(w, "exec1_opcode {:08x}", (s.exec1.inst >> 25) & 0x1f)?;
        writeln!(w, "exec1_src0 {:08x}", s.exec1.src0)?;
        writeln!(w, "exec1_src1 {:08x}", s.exec1.src1)?;
        writeln!(w, "exec1_dst {:08x}", s.exec1.dst)?;
        writeln!(w, "exec1_immediate {:08x}", s.exec1.imm)?;
        writeln!(w, "exec1_alu0 {:08x}", s.exec1.alu0)?;
        writeln!(w, "exec1_alu1 {:08x}", s.exec1.alu1)?;
        writeln!(w, "exec1_aluout {:08x}", s.exec1.aluout)?;

        writeln!(w, "\n\n")?;
        Ok(())
    }
}
