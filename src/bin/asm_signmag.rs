//! Assembler for the sign-magnitude addition program.

use clap::Parser;
use std::process;

use sp_emulator::asm::programs;
use sp_emulator::sim::loader;

/// Emits the sign-magnitude addition image.
#[derive(Parser, Debug)]
#[command(about = "SP assembler: sign-magnitude addition")]
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

    if let Err(e) = loader::write_image(&args.output, &programs::sign_magnitude()) {
        eprintln!("asm-signmag: {}", e);
        process::exit(1);
    }
    println!("SP assembler generated {}", args.output);
}
