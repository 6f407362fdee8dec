//! The SP core: state container and cycle driver.

use crate::common::SpError;
use crate::core::pipeline::{hazards, latches::PipeRegs};
use crate::core::{stages, units};
use crate::mem::Sram;
use crate::stats::SimStats;
use crate::trace::Tracer;

/// The SP core.
///
/// Owns the two pipeline-state snapshots, both SRAMs, the statistics
/// counters, and the trace writers. All global mutable state is threaded
/// through this one value; nothing is ambient.
pub struct Cpu {
    /// Committed snapshot, read-only during a cycle.
    pub curr: PipeRegs,
    /// Next snapshot, assembled during the cycle and swapped in at the end.
    pub next: PipeRegs,
    /// Instruction memory.
    pub srami: Sram,
    /// Data memory.
    pub sramd: Sram,
    /// Statistics counters.
    pub stats: SimStats,
    /// Instruction and cycle trace writers.
    pub tracer: Tracer,
    /// Set when a HLT commits; the driver loop stops after that cycle.
    pub halted: bool,
    /// The pc of the committed HLT, once one has committed.
    pub halt_pc: Option<u16>,
    /// Emit per-cycle diagnostics on stderr.
    pub trace: bool,
}

impl Cpu {
    /// Creates a core with both memories initialized from the same image.
    pub fn new(image: &[u32], tracer: Tracer, trace: bool) -> Self {
        let mut srami = Sram::new();
        let mut sramd = Sram::new();
        srami.load_image(image);
        sramd.load_image(image);
        Self {
            curr: PipeRegs::reset(),
            next: PipeRegs::default(),
            srami,
            sramd,
            stats: SimStats::default(),
            tracer,
            halted: false,
            halt_pc: None,
            trace,
        }
    }

    /// Whether stderr diagnostics are on for this run.
    pub fn trace_enabled(&self) -> bool {
        self.trace || cfg!(feature = "always-trace")
    }

    /// Advances the machine by one clock cycle.
    ///
    /// Stage order is oldest first, so every stage reads the committed
    /// snapshot and the same cycle's hazard signals:
    ///
    /// 1. Emit the cycle trace from the committed snapshot.
    /// 2. Writeback (exec1) -- commits registers, emits the instruction
    ///    trace, latches halt.
    /// 3. exec0 -> exec1 promotion (always, even on stall) plus memory
    ///    requests and DMA opcode effects.
    /// 4. Hazard detection.
    /// 5. dec1 -> exec0, dec0 -> dec1, fetch1 -> dec0, fetch0 -> fetch1.
    /// 6. DMA engine tick.
    /// 7. SRAM end-of-cycle commit, then the snapshot swap.
    pub fn tick(&mut self) -> Result<(), SpError> {
        self.tracer
            .cycle_block(&self.curr)
            .map_err(|e| SpError::io("cycle trace", e))?;
        if self.trace_enabled() {
            self.print_pipeline_diagram();
        }

        self.stats.cycles += 1;
        self.next = self.curr.clone();
        self.next.cycle = self.curr.cycle + 1;

        stages::write_back::wb_stage(self).map_err(|e| SpError::io("instruction trace", e))?;
        stages::execute::exec0_stage(self);

        let hz = hazards::detect(&self.curr, &self.sramd, self.trace_enabled());
        if hz.stall {
            self.stats.stalls_data += 1;
        }
        if hz.flush {
            self.stats.flushes += 1;
        }

        stages::decode::dec1_stage(self, &hz);
        stages::decode::dec0_stage(self, &hz);
        stages::fetch::fetch1_stage(self, &hz);
        stages::fetch::fetch0_stage(self, &hz);

        units::dma::tick(
            &self.curr.dma,
            &mut self.next.dma,
            &mut self.sramd,
            &mut self.stats,
        );

        self.srami.end_cycle();
        self.sramd.end_cycle();
        std::mem::swap(&mut self.curr, &mut self.next);
        Ok(())
    }

    /// One-line stage occupancy diagram on stderr.
    pub fn print_pipeline_diagram(&self) {
        let s = &self.curr;
        eprintln!(
            "[cycle {}] f0:{}@{} f1:{}@{} d0:{}@{} d1:{}@{} e0:{}@{} e1:{}@{} dma:{}",
            s.cycle,
            s.fetch0.active as u8,
            s.fetch0.pc,
            s.fetch1.active as u8,
            s.fetch1.pc,
            s.dec0.active as u8,
            s.dec0.pc,
            s.dec1.active as u8,
            s.dec1.pc,
            s.exec0.active as u8,
            s.exec0.pc,
            s.exec1.active as u8,
            s.exec1.pc,
            s.dma.busy as u8,
        );
    }
}
