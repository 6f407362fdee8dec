//! Pipeline latch structures for inter-stage communication.
//!
//! Pipeline latches store instruction state as it flows through the six
//! pipeline stages. The simulator keeps two full copies of this state: the
//! committed snapshot read during a cycle and the next snapshot being
//! assembled, swapped atomically at the end of the cycle.

use crate::common::RegisterFile;
use crate::core::units::dma::DmaRegs;
use crate::isa::Opcode;

/// The fetch0 latch (pc generation and fetch issue).
///
/// Holds the program counter whose instruction word is being requested
/// from `srami` this cycle.
#[derive(Clone, Default, Debug)]
pub struct Fetch0 {
    /// Valid bit.
    pub active: bool,
    /// Program counter of the fetch in flight.
    pub pc: u16,
}

/// The fetch1 latch (fetch response slot).
///
/// Occupies the one-cycle latency window of the `srami` read. The word
/// itself arrives on `srami.dataout` while the instruction sits here and
/// is latched together with this pc into [`Dec0`].
#[derive(Clone, Default, Debug)]
pub struct Fetch1 {
    /// Valid bit.
    pub active: bool,
    /// Program counter of the instruction.
    pub pc: u16,
}

/// The dec0 latch (raw instruction word).
#[derive(Clone, Default, Debug)]
pub struct Dec0 {
    /// Valid bit.
    pub active: bool,
    /// Program counter of the instruction.
    pub pc: u16,
    /// 32-bit instruction word.
    pub inst: u32,
}

/// The dec1 latch (decoded fields and provisional operands).
///
/// `alu0`/`alu1` here are read from the register file at decode time and
/// may be stale; the dec1 stage re-forms them with forwarding applied
/// before latching into [`Exec0`].
#[derive(Clone, Default, Debug)]
pub struct Dec1 {
    /// Valid bit.
    pub active: bool,
    /// Program counter of the instruction.
    pub pc: u16,
    /// 32-bit instruction word.
    pub inst: u32,
    /// Decoded opcode.
    pub opcode: Opcode,
    /// Destination register field.
    pub dst: usize,
    /// First source register field.
    pub src0: usize,
    /// Second source register field.
    pub src1: usize,
    /// Sign-extended immediate.
    pub imm: u32,
    /// Provisional first operand.
    pub alu0: u32,
    /// Provisional second operand.
    pub alu1: u32,
}

/// The exec0 latch (final operands entering execute).
#[derive(Clone, Default, Debug)]
pub struct Exec0 {
    /// Valid bit.
    pub active: bool,
    /// Program counter of the instruction.
    pub pc: u16,
    /// 32-bit instruction word.
    pub inst: u32,
    /// Decoded opcode.
    pub opcode: Opcode,
    /// Destination register field.
    pub dst: usize,
    /// First source register field.
    pub src0: usize,
    /// Second source register field.
    pub src1: usize,
    /// Sign-extended immediate.
    pub imm: u32,
    /// First ALU operand, forwarding applied.
    pub alu0: u32,
    /// Second ALU operand, forwarding applied.
    pub alu1: u32,
}

/// The exec1 latch (writeback).
#[derive(Clone, Default, Debug)]
pub struct Exec1 {
    /// Valid bit.
    pub active: bool,
    /// Program counter of the instruction.
    pub pc: u16,
    /// 32-bit instruction word.
    pub inst: u32,
    /// Decoded opcode.
    pub opcode: Opcode,
    /// Destination register field.
    pub dst: usize,
    /// First source register field.
    pub src0: usize,
    /// Second source register field.
    pub src1: usize,
    /// Sign-extended immediate.
    pub imm: u32,
    /// First ALU operand as executed.
    pub alu0: u32,
    /// Second ALU operand as executed.
    pub alu1: u32,
    /// ALU result computed in exec0.
    pub aluout: u32,
}

/// One full snapshot of the architectural and pipeline state.
///
/// The cycle driver reads one snapshot and assembles the next; stale
/// fields in squashed or bubbled latches are harmless because their
/// valid bits are clear.
#[derive(Clone, Default, Debug)]
pub struct PipeRegs {
    /// Architectural register file.
    pub r: RegisterFile,
    /// Cycle counter.
    pub cycle: u64,
    /// pc generation / fetch issue.
    pub fetch0: Fetch0,
    /// Fetch response slot.
    pub fetch1: Fetch1,
    /// Raw instruction word.
    pub dec0: Dec0,
    /// Decoded fields and provisional operands.
    pub dec1: Dec1,
    /// Final operands entering execute.
    pub exec0: Exec0,
    /// Writeback.
    pub exec1: Exec1,
    /// DMA engine registers.
    pub dma: DmaRegs,
}

impl PipeRegs {
    /// The reset state: all latches empty, fetch0 active at pc 0.
    pub fn reset() -> Self {
        let mut s = Self::default();
        s.fetch0.active = true;
        s.fetch0.pc = 0;
        s
    }
}
