//! SP Pipelined Simulator CLI.
//!
//! Runs a hex memory image on the cycle-accurate pipelined core, writing
//! the committed-instruction trace and the per-cycle trace as it goes and
//! dumping both memories when the program halts.
//!
//! Exit codes: 0 on a normal HLT, 1 on I/O, image or argument errors,
//! 2 when the max-cycle cap is exceeded.

use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;

use sp_emulator::common::SpError;
use sp_emulator::config::Config;
use sp_emulator::core::Cpu;
use sp_emulator::sim::{self, loader};
use sp_emulator::trace::Tracer;

/// Command-line arguments for the pipelined simulator.
#[derive(Parser, Debug)]
#[command(about = "SP cycle-accurate pipeline simulator")]
struct Args {
    /// Hex memory image, one 32-bit word per line.
    image: String,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the runaway-execution cycle cap.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Emit per-cycle diagnostics on stderr.
    #[arg(long)]
    trace: bool,

    /// Write the statistics counters as JSON to this path.
    #[arg(long)]
    stats_json: Option<String>,
}

fn trace_writer(path: &str) -> Result<Box<dyn Write>, SpError> {
    let file = File::create(path).map_err(|e| SpError::io(path, e))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn run(args: &Args) -> Result<(), SpError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(cap) = args.max_cycles {
        config.general.max_cycles = cap;
    }
    if args.trace {
        config.general.trace_pipeline = true;
    }

    let image = loader::load_image(&args.image)?;
    let tracer = Tracer::new(
        Some(trace_writer(&config.output.inst_trace)?),
        Some(trace_writer(&config.output.cycle_trace)?),
    );
    let mut cpu = Cpu::new(&image, tracer, config.general.trace_pipeline);

    let result = sim::run(&mut cpu, config.general.max_cycles);

    if cpu.halted {
        loader::dump_sram(&config.output.srami_dump, &cpu.srami)?;
        loader::dump_sram(&config.output.sramd_dump, &cpu.sramd)?;
    }

    cpu.stats.print();
    if let Some(path) = &args.stats_json {
        let json = serde_json::to_string_pretty(&cpu.stats)
            .map_err(|e| SpError::io(path, e.into()))?;
        std::fs::write(path, json).map_err(|e| SpError::io(path, e))?;
    }

    result
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Keep help/version on stdout with status 0; everything else is
            // an argument error and exits 1 per the simulator's contract.
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
            eprintln!("sp-sim: {}", e);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("sp-sim: {}", e);
            process::exit(1);
        }
    }
}
