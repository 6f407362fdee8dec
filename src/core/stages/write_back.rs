//! Writeback stage (exec1).

use crate::core::pipeline::hazards;
use crate::core::Cpu;
use crate::isa::Opcode;

/// exec1: commits the instruction and emits its trace block.
///
/// The trace is written before commit so the register snapshot shows the
/// pre-writeback state, as the committed-instruction trace format requires.
/// Register writes go into the next snapshot; reads performed elsewhere in
/// the same cycle see the old values, with forwarding closing the gap.
pub fn wb_stage(cpu: &mut Cpu) -> std::io::Result<()> {
    let wb = cpu.curr.exec1.clone();
    if !wb.active {
        return Ok(());
    }

    let load_value = cpu.sramd.dataout();
    cpu.tracer
        .instruction(&wb, cpu.curr.r.snapshot(), load_value)?;

    cpu.stats.instructions_retired += 1;
    match wb.opcode {
        Opcode::Ld => cpu.stats.inst_load += 1,
        Opcode::St => cpu.stats.inst_store += 1,
        Opcode::DmaStart | Opcode::DmaStatus => cpu.stats.inst_dma += 1,
        op if op.is_branch() => cpu.stats.inst_branch += 1,
        op if op.writes_aluout() => cpu.stats.inst_alu += 1,
        _ => {}
    }

    if cpu.trace_enabled() {
        eprintln!("[wb] pc={} {:?}", wb.pc, wb.opcode);
    }

    match wb.opcode {
        op if op.writes_aluout() => {
            cpu.next.r.write(wb.dst, wb.aluout);
        }
        Opcode::Ld => {
            cpu.next.r.write(wb.dst, load_value);
        }
        Opcode::St => {}
        op if op.is_branch() => {
            // The link write happens at the branch's own writeback; the
            // saved value is the "from" address.
            if hazards::branch_taken(op, wb.alu0, wb.alu1) {
                cpu.next.r.write(7, wb.pc as u32);
                cpu.stats.branches_taken += 1;
            }
        }
        Opcode::Hlt => {
            cpu.halted = true;
            cpu.halt_pc = Some(wb.pc);
        }
        _ => {}
    }

    Ok(())
}
