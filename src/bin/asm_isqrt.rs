//! Assembler for the integer square root program.

use clap::Parser;
use std::process;

use sp_emulator::asm::programs;
use sp_emulator::sim::loader;

/// Emits the integer square root image.
#[derive(Parser, Debug)]
#[command(about = "SP assembler: integer square root")]
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

    if let Err(e) = loader::write_image(&args.output, &programs::isqrt()) {
        eprintln!("asm-isqrt: {}", e);
        process::exit(1);
    }
    println!("SP assembler generated {}", args.output);
}
