//! Simulator configuration.
//!
//! Loaded from an optional TOML file; every field has a default so the
//! simulator runs with no configuration at all. Command-line flags override
//! individual fields after loading.

use serde::Deserialize;
use std::fs;

use crate::common::SpError;

const DEFAULT_MAX_CYCLES: u64 = 500_000;

/// Top-level configuration tree.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Run behavior.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Output file paths.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Run behavior settings.
#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-cycle stderr diagnostics (stage occupancy, forwarding).
    #[serde(default)]
    pub trace_pipeline: bool,

    /// Abort the run after this many cycles without a HLT.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_pipeline: false,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

/// Output file paths for traces and memory dumps.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Committed-instruction trace.
    #[serde(default = "default_inst_trace")]
    pub inst_trace: String,

    /// Per-cycle latch dump.
    #[serde(default = "default_cycle_trace")]
    pub cycle_trace: String,

    /// Instruction memory dump written on HLT.
    #[serde(default = "default_srami_dump")]
    pub srami_dump: String,

    /// Data memory dump written on HLT.
    #[serde(default = "default_sramd_dump")]
    pub sramd_dump: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            inst_trace: default_inst_trace(),
            cycle_trace: default_cycle_trace(),
            srami_dump: default_srami_dump(),
            sramd_dump: default_sramd_dump(),
        }
    }
}

impl Config {
    /// Loads a configuration file.
    pub fn load(path: &str) -> Result<Self, SpError> {
        let content = fs::read_to_string(path).map_err(|e| SpError::io(path, e))?;
        toml::from_str(&content).map_err(|e| SpError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_inst_trace() -> String {
    "inst_trace.txt".to_string()
}

fn default_cycle_trace() -> String {
    "cycle_trace.txt".to_string()
}

fn default_srami_dump() -> String {
    "srami_out.txt".to_string()
}

fn default_sramd_dump() -> String {
    "sramd_out.txt".to_string()
}
