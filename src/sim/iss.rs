//! Functional reference interpreter.
//!
//! Executes SP programs in plain program order with no pipeline timing.
//! It shares the ALU and the register-file operand rules with the pipelined
//! core, so for any halting program the two produce identical final memory
//! (the forwarding-correctness oracle).
//!
//! DMA is synchronous here: DMA_START performs the whole ascending-order
//! copy at once, which leaves memory exactly as the engine's one-word-per-
//! cycle version does, and DMA_STATUS therefore always reads idle.

use crate::common::{RegisterFile, SpError};
use crate::core::units::alu::Alu;
use crate::isa::{Instruction, Opcode};
use crate::mem::SRAM_WORDS;

/// The sequential SP interpreter.
pub struct Iss {
    /// Architectural registers.
    pub r: RegisterFile,
    /// Unified memory (the pipelined core's `sramd` counterpart).
    pub mem: Vec<u32>,
    /// Program counter.
    pub pc: u16,
    /// Set when HLT executes.
    pub halted: bool,
    /// Instructions executed.
    pub steps: u64,
}

impl Iss {
    /// Creates an interpreter with memory initialized from an image.
    pub fn new(image: &[u32]) -> Self {
        let mut mem = vec![0; SRAM_WORDS];
        let n = image.len().min(SRAM_WORDS);
        mem[..n].copy_from_slice(&image[..n]);
        Self {
            r: RegisterFile::new(),
            mem,
            pc: 0,
            halted: false,
            steps: 0,
        }
    }

    /// Executes one instruction; returns its pc and raw word.
    pub fn step(&mut self) -> (u16, u32) {
        let pc = self.pc;
        let word = self.mem[pc as usize];
        let inst = Instruction::decode(word);
        let imm = inst.simm();

        self.pc = self.pc.wrapping_add(1);
        self.steps += 1;

        let val0 = self.r.operand(inst.src0, imm);
        let val1 = self.r.operand(inst.src1, imm);

        match inst.opcode {
            op if op.is_alu() => {
                if let Some(result) = Alu::execute(op, val0, val1, imm) {
                    self.r.write(inst.dst, result);
                }
            }
            Opcode::Lhi => {
                let low = self.r.operand(inst.dst, imm);
                if let Some(result) = Alu::execute(Opcode::Lhi, low, 0, imm) {
                    self.r.write(inst.dst, result);
                }
            }
            Opcode::Ld => {
                self.r.write(inst.dst, self.mem[(val1 & 0xffff) as usize]);
            }
            Opcode::St => {
                self.mem[(val1 & 0xffff) as usize] = val0;
            }
            op if op.is_cond_branch() => {
                if crate::core::pipeline::hazards::branch_taken(op, val0, val1) {
                    self.r.write(7, pc as u32);
                    self.pc = (imm & 0xffff) as u16;
                }
            }
            Opcode::Jin => {
                let target = self.r.operand(inst.dst, imm);
                self.r.write(7, pc as u32);
                self.pc = (target & 0xffff) as u16;
            }
            Opcode::DmaStart => {
                // Whole copy at once, ascending order: final memory matches
                // the concurrent engine word for word, overlap included.
                let len = imm & 0xffff;
                for i in 0..len {
                    let word = self.mem[(val0.wrapping_add(i) & 0xffff) as usize];
                    self.mem[(val1.wrapping_add(i) & 0xffff) as usize] = word;
                }
            }
            Opcode::DmaStatus => {
                self.r.write(inst.dst, 0);
            }
            Opcode::Hlt => {
                self.halted = true;
            }
            _ => {}
        }

        (pc, word)
    }

    /// Runs to HLT or the step cap.
    pub fn run(&mut self, max_steps: u64) -> Result<(), SpError> {
        while !self.halted {
            if self.steps >= max_steps {
                return Err(SpError::CycleLimit { cap: max_steps });
            }
            let _ = self.step();
        }
        Ok(())
    }
}
