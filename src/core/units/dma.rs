//! DMA copy engine.
//!
//! A two-state (idle/busy) machine beside the pipeline that copies one word
//! of `sramd` per cycle, in ascending counter order, independent of pipeline
//! stalls. It accesses cells directly rather than through the single port,
//! so it never contends with CPU loads and stores; a word copied during
//! cycle `t` is visible to a load issued in `t`, matching CPU store
//! visibility.
//!
//! Overlapping regions where `dst > src` and `dst - src < len` overwrite
//! later source words before they are read. That is the defined behavior;
//! callers stage through scratch memory if they need a safe copy.

use crate::mem::Sram;
use crate::stats::SimStats;

/// DMA engine registers.
///
/// Invariants: `counter <= len`; `busy` implies `!done`; once the counter
/// reaches `len` the next tick raises `done` and drops `busy`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DmaRegs {
    /// A copy is in flight.
    pub busy: bool,
    /// The last copy ran to completion.
    pub done: bool,
    /// Source base address.
    pub src_addr: u32,
    /// Destination base address.
    pub dst_addr: u32,
    /// Number of words to copy.
    pub len: u32,
    /// Words copied so far.
    pub counter: u32,
}

/// Advances the engine one tick.
///
/// Reads the committed registers and writes the next snapshot, copying at
/// most one word. Runs every cycle regardless of what the pipeline does.
pub fn tick(curr: &DmaRegs, next: &mut DmaRegs, sramd: &mut Sram, stats: &mut SimStats) {
    if !curr.busy || curr.done {
        return;
    }
    if curr.counter < curr.len {
        let word = sramd.get(curr.src_addr.wrapping_add(curr.counter));
        sramd.set(curr.dst_addr.wrapping_add(curr.counter), word);
        next.counter = curr.counter + 1;
        stats.dma_words_copied += 1;
    } else {
        next.done = true;
        next.busy = false;
    }
}
