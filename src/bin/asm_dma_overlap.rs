//! Assembler for the overlapping DMA copy test program.

use clap::Parser;
use std::process;

use sp_emulator::asm::programs;
use sp_emulator::sim::loader;

/// Emits the overlapping DMA copy test image.
#[derive(Parser, Debug)]
#[command(about = "SP assembler: overlapping DMA copy test")]
struct Args {
    /// Output image path.
    output: String,
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

    if let Err(e) = loader::write_image(&args.output, &programs::dma_overlap()) {
        eprintln!("asm-dma-overlap: {}", e);
        process::exit(1);
    }
    println!("SP assembler generated {} (DMA overlap test)", args.output);
}
