use crate::config::SimConfig;
use crate::error::{LineError, Result, SimError};
use crate::instructions::{parse_instruction, Instruction};
use crate::operator;
use crate::runtime::measurement::{self, Measurement};
use crate::runtime::quantum_state::{BasisAmplitude, QuantumState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// What a single executed instruction hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Outcome {
    Initialized { qubits: usize },
    Applied,
    Snapshot { qubits: usize, amplitudes: Vec<BasisAmplitude> },
    Measured(Measurement),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub lines: usize,
    pub executed: usize,
    pub measurements: Vec<Measurement>,
}

/// One program run: the active register plus everything needed to drive it.
pub struct Session {
    config: SimConfig,
    state: Option<QuantumState>,
    rng: StdRng,
}

impl Session {
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Session {
            config,
            state: None,
            rng,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> Option<&QuantumState> {
        self.state.as_ref()
    }

    /// Active register size, zero before the first `Q[n]`.
    pub fn num_qubits(&self) -> usize {
        self.state.as_ref().map_or(0, QuantumState::num_qubits)
    }

    fn active_state(&mut self) -> Result<&mut QuantumState> {
        self.state.as_mut().ok_or(SimError::UninitializedRegister)
    }

    pub fn execute(&mut self, instruction: &Instruction) -> Result<Outcome> {
        log::trace!("executing {}", instruction);
        let kernel = self.config.kernel;
        match *instruction {
            Instruction::Init(n) => {
                let limit = self.config.qubit_limit();
                if n > limit {
                    return Err(SimError::RegisterTooLarge { requested: n, limit });
                }
                log::debug!("initializing {}-qubit register", n);
                self.state = Some(QuantumState::new(n));
                Ok(Outcome::Initialized { qubits: n })
            }
            Instruction::SingleGate(gate, q) => {
                let state = self.active_state()?;
                operator::apply_single_qubit_gate(state, &gate.matrix(), q, kernel)?;
                self.after_gate()?;
                Ok(Outcome::Applied)
            }
            Instruction::ControlledX { control, target } => {
                let state = self.active_state()?;
                operator::apply_cx(state, control, target, kernel)?;
                self.after_gate()?;
                Ok(Outcome::Applied)
            }
            Instruction::Display => {
                let state = self.active_state()?;
                Ok(Outcome::Snapshot {
                    qubits: state.num_qubits(),
                    amplitudes: state.nonzero_amplitudes(),
                })
            }
            Instruction::Measure(q) => {
                let mode = self.config.measurement;
                let state = self.state.as_mut().ok_or(SimError::UninitializedRegister)?;
                let result = measurement::measure(state, q, &mut self.rng, mode)?;
                log::debug!(
                    "qubit {} measured {} (p1 = {:.6})",
                    q,
                    result.outcome,
                    result.probability_of_one
                );
                Ok(Outcome::Measured(result))
            }
        }
    }

    fn after_gate(&mut self) -> Result<()> {
        if !self.config.validate {
            return Ok(());
        }
        match &self.state {
            Some(state) => state.validate_state(),
            None => Ok(()),
        }
    }

    /// Runs a program line by line, handing every outcome to `sink`.
    ///
    /// The first failing line aborts the run; nothing after it executes.
    pub fn run_source<F>(&mut self, source: &str, mut sink: F) -> std::result::Result<RunSummary, LineError>
    where
        F: FnMut(usize, &Outcome),
    {
        let mut summary = RunSummary::default();
        for (idx, line) in source.lines().enumerate() {
            let line_number = idx + 1;
            summary.lines = line_number;
            let instruction = match parse_instruction(line) {
                Ok(Some(inst)) => inst,
                Ok(None) => continue,
                Err(kind) => return Err(self.fail(line_number, kind)),
            };
            let outcome = self
                .execute(&instruction)
                .map_err(|kind| self.fail(line_number, kind))?;
            summary.executed += 1;
            if let Outcome::Measured(m) = &outcome {
                summary.measurements.push(*m);
            }
            sink(line_number, &outcome);
        }
        Ok(summary)
    }

    fn fail(&self, line: usize, kind: SimError) -> LineError {
        log::debug!("line {}: {}", line, kind);
        LineError::new(line, kind)
    }
}
