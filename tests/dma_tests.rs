//! DMA engine tests: the engine state machine, whole-program copies, and
//! concurrency with the pipeline.

use sp_emulator::asm::{programs, Assembler};
use sp_emulator::core::units::dma::{self, DmaRegs};
use sp_emulator::core::Cpu;
use sp_emulator::isa::Opcode::*;
use sp_emulator::mem::Sram;
use sp_emulator::sim;
use sp_emulator::stats::SimStats;
use sp_emulator::trace::Tracer;

fn run_to_halt(image: &[u32]) -> Cpu {
    let mut cpu = Cpu::new(image, Tracer::disabled(), false);
    sim::run(&mut cpu, 100_000).expect("program should halt");
    cpu
}

/// Ticks the engine over a snapshot pair, like the cycle driver does.
fn engine_tick(regs: &mut DmaRegs, sramd: &mut Sram, stats: &mut SimStats) {
    let curr = *regs;
    dma::tick(&curr, regs, sramd, stats);
}

/// Tests a disjoint copy word by word through the engine alone.
#[test]
fn test_engine_disjoint_copy() {
    let mut sramd = Sram::new();
    for i in 0..4 {
        sramd.set(100 + i, 0xA0 + i);
    }
    let mut regs = DmaRegs {
        busy: true,
        src_addr: 100,
        dst_addr: 200,
        len: 4,
        ..Default::default()
    };
    let mut stats = SimStats::default();

    // One word per tick, then the done handoff.
    for i in 0..4u32 {
        engine_tick(&mut regs, &mut sramd, &mut stats);
        assert_eq!(regs.counter, i + 1);
        assert!(regs.busy);
    }
    engine_tick(&mut regs, &mut sramd, &mut stats);
    assert!(!regs.busy);
    assert!(regs.done);

    for i in 0..4 {
        assert_eq!(sramd.get(200 + i), 0xA0 + i);
    }
    assert_eq!(stats.dma_words_copied, 4);
}

/// Tests the defined ascending-order overlap behavior: with dst = src + 10
/// the pattern repeats with period 10.
#[test]
fn test_engine_overlap_ascending() {
    let mut sramd = Sram::new();
    for i in 0..50 {
        sramd.set(50 + i, 0x100 + i);
    }
    let mut regs = DmaRegs {
        busy: true,
        src_addr: 50,
        dst_addr: 60,
        len: 50,
        ..Default::default()
    };
    let mut stats = SimStats::default();

    while regs.busy {
        engine_tick(&mut regs, &mut sramd, &mut stats);
    }

    for i in 0..50 {
        assert_eq!(
            sramd.get(60 + i),
            0x100 + i % 10,
            "word {} carries the overwritten source",
            i
        );
    }
}

/// Tests that a zero-length transfer completes without touching memory.
#[test]
fn test_engine_zero_length() {
    let mut sramd = Sram::new();
    sramd.set(200, 7);
    let mut regs = DmaRegs {
        busy: true,
        src_addr: 100,
        dst_addr: 200,
        len: 0,
        ..Default::default()
    };
    let mut stats = SimStats::default();

    engine_tick(&mut regs, &mut sramd, &mut stats);
    assert!(!regs.busy);
    assert!(regs.done);
    assert_eq!(sramd.get(200), 7);
    assert_eq!(stats.dma_words_copied, 0);
}

/// Tests the DMA copy program end to end (the polling idiom included).
#[test]
fn test_dma_copy_program() {
    let cpu = run_to_halt(&programs::dma_copy());

    let expected = [0xdeadbeefu32, 0xcafebabe, 0x12345678, 0x87654321];
    for (i, word) in expected.iter().enumerate() {
        assert_eq!(cpu.sramd.get(200 + i as u32), *word);
        assert_eq!(cpu.sramd.get(100 + i as u32), *word, "source untouched");
    }
    assert_eq!(cpu.curr.r.read(4), 0, "the last polled status reads idle");
    assert!(!cpu.curr.dma.busy);
    assert_eq!(cpu.stats.dma_starts, 1);
    assert_eq!(cpu.stats.dma_words_copied, 4);
}

/// Tests the overlap program: the verify loop spots the overwritten source
/// at index 10 and takes the FAIL path.
#[test]
fn test_dma_overlap_program() {
    let cpu = run_to_halt(&programs::dma_overlap());

    assert_eq!(cpu.curr.r.read(2), 0, "the verify loop must fail");
    assert_eq!(cpu.halt_pc, Some(20), "halted at the FAIL exit");
    // The copy itself behaved as defined: period-10 pattern.
    for i in 0..50 {
        assert_eq!(cpu.sramd.get(60 + i), 0x100 + i % 10);
    }
}

/// Tests that the engine makes progress while the pipeline keeps
/// committing unrelated instructions.
#[test]
fn test_dma_concurrent_with_pipeline() {
    let mut a = Assembler::new();
    a.emit(Add, 2, 1, 0, 100);
    a.emit(Add, 3, 1, 0, 200);
    a.emit(DmaStart, 0, 2, 3, 8);
    for _ in 0..8 {
        a.emit(Add, 4, 4, 1, 1);
    }
    a.emit(DmaStatus, 5, 0, 0, 0);
    a.emit(Jne, 0, 0, 5, 11);
    a.emit(Hlt, 0, 0, 0, 0);
    for i in 0..8 {
        a.data(100 + i, 0x50 + i as u32);
    }

    let cpu = run_to_halt(&a.image(208));
    assert_eq!(
        cpu.curr.r.read(4),
        8,
        "every instruction in the busy window commits"
    );
    for i in 0..8 {
        assert_eq!(cpu.sramd.get(200 + i), 0x50 + i);
    }
    assert_eq!(cpu.stats.dma_words_copied, 8);
}

/// Tests that DMA_START while busy is dropped, observable via the counters
/// and the surviving first transfer.
#[test]
fn test_dma_start_while_busy_ignored() {
    let mut a = Assembler::new();
    a.emit(Add, 2, 1, 0, 100);
    a.emit(Add, 3, 1, 0, 200);
    a.emit(Add, 4, 1, 0, 300);
    a.emit(DmaStart, 0, 2, 3, 50);
    a.emit(DmaStart, 0, 2, 4, 50); // engine busy: dropped
    a.emit(DmaStatus, 5, 0, 0, 0);
    a.emit(Jne, 0, 0, 5, 5);
    a.emit(Hlt, 0, 0, 0, 0);
    for i in 0..50 {
        a.data(100 + i, 1000 + i as u32);
    }

    let cpu = run_to_halt(&a.image(360));
    assert_eq!(cpu.stats.dma_starts, 1);
    assert_eq!(cpu.stats.dma_starts_ignored, 1);
    for i in 0..50 {
        assert_eq!(cpu.sramd.get(200 + i), 1000 + i, "first transfer lands");
        assert_eq!(cpu.sramd.get(300 + i), 0, "second start never ran");
    }
}

/// Tests the busy window: started at exec0, the flag holds for len + 1
/// engine ticks (len copies plus the done handoff) and then stays clear.
#[test]
fn test_dma_busy_window() {
    let mut a = Assembler::new();
    a.emit(Add, 2, 1, 0, 100);
    a.emit(Add, 3, 1, 0, 200);
    a.emit(DmaStart, 0, 2, 3, 4);
    a.emit(DmaStatus, 4, 0, 0, 0);
    a.emit(Jne, 0, 0, 4, 3);
    a.emit(Hlt, 0, 0, 0, 0);

    let mut cpu = Cpu::new(&a.image(204), Tracer::disabled(), false);
    let mut busy_cycles = 0;
    while !cpu.halted {
        if cpu.curr.dma.busy {
            busy_cycles += 1;
        }
        cpu.tick().expect("tick");
        assert!(cpu.curr.cycle < 1000, "program should halt");
    }
    assert_eq!(busy_cycles, 5, "4 copy ticks plus the done handoff");
    assert!(cpu.curr.dma.done);
    assert!(!cpu.curr.dma.busy);
}
