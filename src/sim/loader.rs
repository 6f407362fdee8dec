//! Memory image loading and dumping.
//!
//! Images are plain text, one 8-hex-digit word per line starting at address
//! 0. Shorter files leave the remaining memory zero-initialized; both SRAMs
//! are initialized from the same image. Dumps use the same format over the
//! full 64Ki words.

use std::fs;
use std::io::{BufWriter, Write};

use crate::common::SpError;
use crate::mem::{Sram, SRAM_WORDS};

/// Loads a hex memory image.
///
/// Blank lines are tolerated; a line that does not parse as hex is an
/// image error. Lines past the SRAM height are ignored, matching the
/// reference loader.
pub fn load_image(path: &str) -> Result<Vec<u32>, SpError> {
    let content = fs::read_to_string(path).map_err(|e| SpError::io(path, e))?;
    let mut words = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if words.len() >= SRAM_WORDS {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let word = u32::from_str_radix(line, 16).map_err(|_| SpError::Image {
            path: path.to_string(),
            line: idx + 1,
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Writes a hex memory image.
pub fn write_image(path: &str, words: &[u32]) -> Result<(), SpError> {
    let file = fs::File::create(path).map_err(|e| SpError::io(path, e))?;
    let mut w = BufWriter::new(file);
    for word in words {
        writeln!(w, "{:08x}", word).map_err(|e| SpError::io(path, e))?;
    }
    w.flush().map_err(|e| SpError::io(path, e))
}

/// Dumps the full contents of an SRAM on HLT.
pub fn dump_sram(path: &str, sram: &Sram) -> Result<(), SpError> {
    let file = fs::File::create(path).map_err(|e| SpError::io(path, e))?;
    let mut w = BufWriter::new(file);
    for addr in 0..SRAM_WORDS as u32 {
        writeln!(w, "{:08x}", sram.get(addr)).map_err(|e| SpError::io(path, e))?;
    }
    w.flush().map_err(|e| SpError::io(path, e))
}
