//! Unit tests for the single-ported SRAM model.

use sp_emulator::mem::Sram;

/// Tests the one-cycle read latency contract.
#[test]
fn test_read_latency_one_cycle() {
    let mut sram = Sram::new();
    sram.set(100, 0xDEAD_BEEF);

    sram.read(100);
    // The response is not visible until the end-of-cycle commit.
    assert_eq!(sram.dataout(), 0);
    sram.end_cycle();
    assert_eq!(sram.dataout(), 0xDEAD_BEEF);
}

/// Tests that dataout holds its value across request-free cycles.
#[test]
fn test_dataout_holds_without_new_request() {
    let mut sram = Sram::new();
    sram.set(5, 42);
    sram.read(5);
    sram.end_cycle();
    assert_eq!(sram.dataout(), 42);

    sram.end_cycle();
    sram.end_cycle();
    assert_eq!(sram.dataout(), 42, "dataout persists with no new read");
}

/// Tests that a write commits at end of cycle, before the read response.
#[test]
fn test_same_cycle_write_then_read() {
    let mut sram = Sram::new();
    sram.write(7, 0x1234_5678);
    sram.read(7);
    sram.end_cycle();
    assert_eq!(sram.get(7), 0x1234_5678);
    assert_eq!(
        sram.dataout(),
        0x1234_5678,
        "same-cycle write is visible to the read response"
    );
}

/// Tests 16-bit address masking on all access paths.
#[test]
fn test_address_masking() {
    let mut sram = Sram::new();
    sram.set(0x1_0005, 99);
    assert_eq!(sram.get(5), 99);
    assert_eq!(sram.get(0x3_0005), 99);

    sram.read(0xABCD_0005);
    sram.end_cycle();
    assert_eq!(sram.dataout(), 99);
}

/// Tests image loading into the low cells.
#[test]
fn test_load_image() {
    let mut sram = Sram::new();
    sram.load_image(&[1, 2, 3]);
    assert_eq!(sram.get(0), 1);
    assert_eq!(sram.get(2), 3);
    assert_eq!(sram.get(3), 0, "cells past the image stay zeroed");
}
