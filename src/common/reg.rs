//! SP architectural register file.
//!
//! Eight 32-bit register slots. Slot 0 is hardwired to zero and slot 1 is
//! the immediate alias: a source field selecting it reads the current
//! instruction's sign-extended immediate instead of stored state. Writes to
//! either slot are silently dropped.

/// Architectural register file.
///
/// Registers r2..r7 are general purpose. r0 always reads as zero, r1 is
/// the immediate alias slot, and neither can be written.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    regs: [u32; 8],
}

impl RegisterFile {
    /// Creates a register file with all slots cleared.
    pub fn new() -> Self {
        Self { regs: [0; 8] }
    }

    /// Reads a register slot. Slot 0 always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Writes a register slot. Writes to slots 0 and 1 are ignored.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx >= 2 {
            self.regs[idx] = val;
        }
    }

    /// Resolves a source selector to an operand value.
    ///
    /// Selector 0 is the hard zero, selector 1 is the sign-extended
    /// immediate of the current instruction, and selectors 2..7 read the
    /// register file.
    pub fn operand(&self, sel: usize, imm: u32) -> u32 {
        match sel {
            0 => 0,
            1 => imm,
            s => self.regs[s],
        }
    }

    /// Returns the raw stored contents, for trace snapshots.
    pub fn snapshot(&self) -> [u32; 8] {
        self.regs
    }
}
