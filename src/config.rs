// simulation settings, loaded from a json file and/or overridden on the command line

use crate::operator::Kernel;
use crate::runtime::measurement::MeasurementMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default ceiling on the register size, 2^24 amplitudes is 256 MiB.
pub const DEFAULT_MAX_QUBITS: usize = 24;

/// No configuration can raise the ceiling past this, 2^30 amplitudes is 16 GiB.
pub const HARD_MAX_QUBITS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed RNG seed for reproducible measurements, entropy when absent.
    pub seed: Option<u64>,
    pub measurement: MeasurementMode,
    pub kernel: Kernel,
    pub max_qubits: usize,
    /// Check normalization after every gate.
    pub validate: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            seed: None,
            measurement: MeasurementMode::Sample,
            kernel: Kernel::Strided,
            max_qubits: DEFAULT_MAX_QUBITS,
            validate: false,
        }
    }
}

impl SimConfig {
    /// The configured ceiling, clamped to [`HARD_MAX_QUBITS`].
    pub fn qubit_limit(&self) -> usize {
        self.max_qubits.min(HARD_MAX_QUBITS)
    }

    pub fn from_json_str(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid config: {}", e))
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("error reading config file {}: {}", path.display(), e))?;
        Self::from_json_str(&text)
    }
}
