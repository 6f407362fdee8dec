//! Execute stage (exec0): ALU, memory issue, and the DMA opcodes.

use crate::core::pipeline::latches::Exec1;
use crate::core::units::alu::Alu;
use crate::core::units::dma::DmaRegs;
use crate::core::Cpu;
use crate::isa::Opcode;

/// exec0: promotes the latch into exec1 and performs the stage's work.
///
/// The promotion is unconditional -- a stall only blocks dec1 -> exec0, so
/// the instruction already in exec0 (the load being waited on) always
/// completes. ALU results land in `aluout`; LD and ST issue their `sramd`
/// port request; DMA_START programs the engine if it is idle; DMA_STATUS
/// captures the busy flag as its writeback value.
pub fn exec0_stage(cpu: &mut Cpu) {
    let ex = cpu.curr.exec0.clone();

    cpu.next.exec1 = Exec1 {
        active: ex.active,
        pc: ex.pc,
        inst: ex.inst,
        opcode: ex.opcode,
        dst: ex.dst,
        src0: ex.src0,
        src1: ex.src1,
        imm: ex.imm,
        alu0: ex.alu0,
        alu1: ex.alu1,
        aluout: 0,
    };

    if !ex.active {
        return;
    }

    if let Some(result) = Alu::execute(ex.opcode, ex.alu0, ex.alu1, ex.imm) {
        cpu.next.exec1.aluout = result;
        return;
    }

    match ex.opcode {
        Opcode::Ld => {
            cpu.sramd.read(ex.alu1);
        }
        Opcode::St => {
            cpu.sramd.write(ex.alu1, ex.alu0);
        }
        Opcode::DmaStart => {
            if cpu.curr.dma.busy {
                // Engine occupied: the start is dropped, observable only
                // through DMA_STATUS.
                cpu.stats.dma_starts_ignored += 1;
            } else {
                cpu.next.dma = DmaRegs {
                    busy: true,
                    done: false,
                    src_addr: ex.alu0 & 0xffff,
                    dst_addr: ex.alu1 & 0xffff,
                    len: ex.imm & 0xffff,
                    counter: 0,
                };
                cpu.stats.dma_starts += 1;
            }
        }
        Opcode::DmaStatus => {
            cpu.next.exec1.aluout = cpu.curr.dma.busy as u32;
        }
        _ => {}
    }
}
