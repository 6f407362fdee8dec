//! Simulation statistics collection and reporting.
//!
//! Tracks cycle and instruction counts, hazard activity, and DMA engine
//! progress. The summary prints in a fixed-width table; `--stats-json`
//! serializes the same counters for scripted consumers.

use serde::Serialize;
use std::time::Instant;

/// Counters collected over one simulation run.
#[derive(Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,

    /// Clock cycles simulated.
    pub cycles: u64,
    /// Instructions committed at exec1.
    pub instructions_retired: u64,

    /// Committed ALU, LHI and DMA_STATUS-class writebacks.
    pub inst_alu: u64,
    /// Committed loads.
    pub inst_load: u64,
    /// Committed stores.
    pub inst_store: u64,
    /// Committed branches (conditional and JIN).
    pub inst_branch: u64,
    /// Committed DMA opcodes.
    pub inst_dma: u64,

    /// Branches that resolved taken.
    pub branches_taken: u64,
    /// Load-use stall cycles.
    pub stalls_data: u64,
    /// Taken-branch flushes.
    pub flushes: u64,

    /// DMA transfers accepted.
    pub dma_starts: u64,
    /// DMA_START opcodes dropped because the engine was busy.
    pub dma_starts_ignored: u64,
    /// Words moved by the engine.
    pub dma_words_copied: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_dma: 0,
            branches_taken: 0,
            stalls_data: 0,
            flushes: 0,
            dma_starts: 0,
            dma_starts_ignored: 0,
            dma_words_copied: 0,
        }
    }
}

impl SimStats {
    /// Prints a formatted summary of the run.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };

        let ipc = self.instructions_retired as f64 / cyc as f64;
        let cpi = cyc as f64 / instr as f64;

        println!("\n==========================================================");
        println!("SP PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", ipc);
        println!("sim_cpi                  {:.4}", cpi);
        println!("----------------------------------------------------------");
        println!("HAZARDS");
        println!(
            "  stalls.load_use        {} ({:.2}%)",
            self.stalls_data,
            (self.stalls_data as f64 / cyc as f64) * 100.0
        );
        println!("  flushes.taken_branch   {}", self.flushes);
        println!("  branches.taken         {}", self.branches_taken);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        let total = instr as f64;
        let mix = |name: &str, count: u64| {
            println!(
                "  {:<22} {} ({:.2}%)",
                name,
                count,
                (count as f64 / total) * 100.0
            );
        };
        mix("op.alu", self.inst_alu);
        mix("op.load", self.inst_load);
        mix("op.store", self.inst_store);
        mix("op.branch", self.inst_branch);
        mix("op.dma", self.inst_dma);
        println!("----------------------------------------------------------");
        println!("DMA ENGINE");
        println!("  dma.starts             {}", self.dma_starts);
        println!("  dma.starts_ignored     {}", self.dma_starts_ignored);
        println!("  dma.words_copied       {}", self.dma_words_copied);
        println!("==========================================================");
    }
}
