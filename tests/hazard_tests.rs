//! Unit tests for hazard detection, forwarding priority, and branch
//! resolution.

use sp_emulator::core::pipeline::hazards::{self, branch_taken};
use sp_emulator::core::pipeline::latches::{Dec1, Exec0, Exec1, PipeRegs};
use sp_emulator::isa::Opcode;
use sp_emulator::mem::Sram;

/// Creates a dec1 latch consuming the given source slots.
fn consumer(src0: usize, src1: usize) -> Dec1 {
    Dec1 {
        active: true,
        src0,
        src1,
        ..Default::default()
    }
}

/// Creates an exec1 latch holding a completed ALU producer.
fn exec1_alu(dst: usize, aluout: u32) -> Exec1 {
    Exec1 {
        active: true,
        opcode: Opcode::Add,
        dst,
        aluout,
        ..Default::default()
    }
}

/// Creates an exec0 latch holding an in-flight ALU producer.
fn exec0_alu(opcode: Opcode, dst: usize, alu0: u32, alu1: u32) -> Exec0 {
    Exec0 {
        active: true,
        opcode,
        dst,
        alu0,
        alu1,
        ..Default::default()
    }
}

/// Tests forwarding of a completed ALU result from exec1.
#[test]
fn test_forward_from_exec1_alu() {
    let mut curr = PipeRegs::default();
    curr.dec1 = consumer(3, 0);
    curr.exec1 = exec1_alu(3, 0xDEAD_BEEF);

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert_eq!(hz.fwd_alu0, Some(0xDEAD_BEEF), "src0 forwards from exec1");
    assert_eq!(hz.fwd_alu1, None, "src1 names no producer");
    assert!(!hz.stall);
}

/// Tests forwarding of a load value from exec1 via the dataout port.
#[test]
fn test_forward_from_exec1_load() {
    let mut sramd = Sram::new();
    sramd.set(40, 0x1234_5678);
    sramd.read(40);
    sramd.end_cycle();

    let mut curr = PipeRegs::default();
    curr.dec1 = consumer(0, 2);
    curr.exec1 = Exec1 {
        active: true,
        opcode: Opcode::Ld,
        dst: 2,
        ..Default::default()
    };

    let hz = hazards::detect(&curr, &sramd, false);
    assert_eq!(
        hz.fwd_alu1,
        Some(0x1234_5678),
        "load value forwards from the dataout port"
    );
}

/// Tests recomputed forwarding from exec0.
#[test]
fn test_forward_from_exec0_recompute() {
    let mut curr = PipeRegs::default();
    curr.dec1 = consumer(4, 4);
    curr.exec0 = exec0_alu(Opcode::Add, 4, 20, 22);

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert_eq!(hz.fwd_alu0, Some(42));
    assert_eq!(hz.fwd_alu1, Some(42));
}

/// Tests that exec1 wins over exec0 when both match a slot.
#[test]
fn test_forward_priority_exec1_over_exec0() {
    let mut curr = PipeRegs::default();
    curr.dec1 = consumer(3, 0);
    curr.exec1 = exec1_alu(3, 0x1111_1111);
    curr.exec0 = exec0_alu(Opcode::Add, 3, 1, 1);

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert_eq!(
        hz.fwd_alu0,
        Some(0x1111_1111),
        "the older producer holds the newer value for the consumer"
    );
}

/// Tests that DMA_STATUS in exec0 forwards its recomputed status.
#[test]
fn test_forward_dma_status_from_exec0() {
    let mut curr = PipeRegs::default();
    curr.dec1 = consumer(5, 0);
    curr.exec0 = Exec0 {
        active: true,
        opcode: Opcode::DmaStatus,
        dst: 5,
        ..Default::default()
    };
    curr.dma.busy = true;

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert_eq!(hz.fwd_alu0, Some(1));
}

/// Tests that a load in exec0 raises the load-use stall.
#[test]
fn test_load_use_stall() {
    let mut curr = PipeRegs::default();
    curr.dec1 = consumer(2, 0);
    curr.exec0 = Exec0 {
        active: true,
        opcode: Opcode::Ld,
        dst: 2,
        ..Default::default()
    };

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert!(hz.stall, "consumer of an in-flight load must stall");
    assert_eq!(hz.fwd_alu0, None, "a load in exec0 has nothing to forward");
}

/// Tests that no stall fires without a matching consumer slot.
#[test]
fn test_no_stall_without_dependency() {
    let mut curr = PipeRegs::default();
    curr.dec1 = consumer(3, 4);
    curr.exec0 = Exec0 {
        active: true,
        opcode: Opcode::Ld,
        dst: 2,
        ..Default::default()
    };

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert!(!hz.stall);
}

/// Tests that producers targeting r0/r1 never forward or stall.
#[test]
fn test_no_forward_for_low_registers() {
    let mut curr = PipeRegs::default();
    curr.dec1 = consumer(1, 0);
    curr.exec1 = exec1_alu(1, 0xBAAD_F00D);
    curr.exec0 = Exec0 {
        active: true,
        opcode: Opcode::Ld,
        dst: 0,
        ..Default::default()
    };

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert_eq!(hz.fwd_alu0, None);
    assert!(!hz.stall);
}

/// Tests that an inactive dec1 suppresses all data-hazard handling.
#[test]
fn test_inactive_consumer() {
    let mut curr = PipeRegs::default();
    curr.dec1 = Dec1 {
        active: false,
        src0: 2,
        ..Default::default()
    };
    curr.exec0 = Exec0 {
        active: true,
        opcode: Opcode::Ld,
        dst: 2,
        ..Default::default()
    };

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert!(!hz.stall);
    assert_eq!(hz.fwd_alu0, None);
}

/// Tests conditional branch resolution with signed compares.
#[test]
fn test_branch_resolution_signed() {
    assert!(branch_taken(Opcode::Jlt, 0xFFFF_FFFF, 1)); // -1 < 1
    assert!(!branch_taken(Opcode::Jlt, 1, 0xFFFF_FFFF));
    assert!(branch_taken(Opcode::Jle, 5, 5));
    assert!(branch_taken(Opcode::Jeq, 9, 9));
    assert!(branch_taken(Opcode::Jne, 9, 8));
    assert!(!branch_taken(Opcode::Add, 1, 1));
}

/// Tests the flush and redirect signals for a taken conditional branch.
#[test]
fn test_taken_branch_flush() {
    let mut curr = PipeRegs::default();
    curr.exec0 = Exec0 {
        active: true,
        opcode: Opcode::Jeq,
        alu0: 7,
        alu1: 7,
        imm: 0x1234,
        ..Default::default()
    };

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert!(hz.branch_taken);
    assert!(hz.flush);
    assert_eq!(hz.branch_target, 0x1234);
}

/// Tests that JIN always redirects to alu0.
#[test]
fn test_jin_redirect() {
    let mut curr = PipeRegs::default();
    curr.exec0 = Exec0 {
        active: true,
        opcode: Opcode::Jin,
        alu0: 0x0005_0042,
        ..Default::default()
    };

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert!(hz.branch_taken);
    assert_eq!(hz.branch_target, 0x0042, "target masks to 16 bits");
}

/// Tests that a not-taken branch leaves the pipe alone.
#[test]
fn test_not_taken_branch_no_flush() {
    let mut curr = PipeRegs::default();
    curr.exec0 = Exec0 {
        active: true,
        opcode: Opcode::Jeq,
        alu0: 1,
        alu1: 2,
        imm: 0x10,
        ..Default::default()
    };

    let hz = hazards::detect(&curr, &Sram::new(), false);
    assert!(!hz.branch_taken);
    assert!(!hz.flush);
}
