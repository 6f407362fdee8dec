//! Assembler for the DMA background copy test program.

use clap::Parser;
use std::process;

use sp_emulator::asm::programs;
use sp_emulator::sim::loader;

/// Emits the DMA copy test image.
#[derive(Parser, Debug)]
#[command(about = "SP assembler: DMA background copy test")]
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

    if let Err(e) = loader::write_image(&args.output, &programs::dma_copy()) {
        eprintln!("asm-dma: {}", e);
        process::exit(1);
    }
    println!("SP assembler generated {} (DMA test)", args.output);
}
