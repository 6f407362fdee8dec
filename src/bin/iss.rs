//! SP Functional ISS CLI.
//!
//! Executes a hex memory image in plain program order, writing a trace
//! block per instruction and the final data memory. The output serves as
//! the oracle the pipelined simulator is checked against.

use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;

use sp_emulator::common::SpError;
use sp_emulator::isa::Instruction;
use sp_emulator::sim::iss::Iss;
use sp_emulator::sim::loader;

const DEFAULT_MAX_STEPS: u64 = 500_000;

/// Command-line arguments for the functional ISS.
#[derive(Parser, Debug)]
#[command(about = "SP functional instruction-set simulator")]
struct Args {
    /// Hex memory image, one 32-bit word per line.
    image: String,

    /// Abort after this many instructions without a HLT.
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// Instruction trace output path.
    #[arg(long, default_value = "trace.txt")]
    trace_out: String,

    /// Final memory dump output path.
    #[arg(long, default_value = "sram_out.txt")]
    sram_out: String,
}

fn run(args: &Args) -> Result<(), SpError> {
    let image = loader::load_image(&args.image)?;
    let mut iss = Iss::new(&image);

    let trace_file = File::create(&args.trace_out).map_err(|e| SpError::io(&args.trace_out, e))?;
    let mut trace = BufWriter::new(trace_file);

    while !iss.halted {
        if iss.steps >= args.max_steps {
            return Err(SpError::CycleLimit {
                cap: args.max_steps,
            });
        }
        let (pc, word) = iss.step();
        let inst = Instruction::decode(word);
        let r = iss.r.snapshot();
        writeln!(
            trace,
            "PC: {:04x}, INST: {:08x}, opcode = {} ({}), dst = {}, src0 = {}, src1 = {}, immediate = {:08x}",
            pc,
            word,
            (word >> 25) & 0x1f,
            inst.opcode.mnemonic(),
            inst.dst,
            inst.src0,
            inst.src1,
            inst.imm16
        )
        .map_err(|e| SpError::io(&args.trace_out, e))?;
        writeln!(
            trace,
            "r[0] = {:08x} r[1] = {:08x} r[2] = {:08x} r[3] = {:08x}",
            r[0], r[1], r[2], r[3]
        )
        .map_err(|e| SpError::io(&args.trace_out, e))?;
        writeln!(
            trace,
            "r[4] = {:08x} r[5] = {:08x} r[6] = {:08x} r[7] = {:08x}",
            r[4], r[5], r[6], r[7]
        )
        .map_err(|e| SpError::io(&args.trace_out, e))?;
    }
    trace.flush().map_err(|e| SpError::io(&args.trace_out, e))?;

    loader::write_image(&args.sram_out, &iss.mem)
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.use_stderr() {
                eprint!("{}", e);
                process::exit(1);
            }
            print!("{}", e);
            process::exit(0);
        }
    };

    match run(&args) {
        Ok(()) => {}
        Err(e @ SpError::CycleLimit { .. }) => {
            eprintln!("sp-iss: {}", e);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("sp-iss: {}", e);
            process::exit(1);
        }
    }
}
