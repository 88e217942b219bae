//! Error kinds raised while parsing and executing circuit programs.
//!
//! Every operation returns [`SimError`] as close to the failure as possible;
//! the session wraps the first one it sees in a [`LineError`] and stops.

use std::fmt;
use thiserror::Error;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Why an operand was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeViolation {
    /// Qubit index is not below the active register size.
    Qubit { qubit: usize, size: usize },
    /// Operand was written with a minus sign.
    Negative { value: i64 },
    /// Control and target of a two-qubit gate are not neighbours.
    NotAdjacent { control: usize, target: usize },
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeViolation::Qubit { qubit, size } => {
                write!(f, "qubit {} out of range for {}-qubit register", qubit, size)
            }
            RangeViolation::Negative { value } => write!(f, "negative qubit index {}", value),
            RangeViolation::NotAdjacent { control, target } => write!(
                f,
                "control {} and target {} are not adjacent",
                control, target
            ),
        }
    }
}

/// Errors that can occur while simulating a circuit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The line does not start with any known opcode.
    #[error("unrecognized instruction '{0}'")]
    UnrecognizedOpcode(String),

    /// A qubit/control/target operand is unusable for the active register.
    #[error("operand out of range: {0}")]
    OperandOutOfRange(RangeViolation),

    /// A gate, display or measurement ran before any `Q[n]`.
    #[error("register used before initialization")]
    UninitializedRegister,

    /// Bracket or terminator placement is wrong.
    #[error("malformed syntax: {0}")]
    MalformedSyntax(String),

    /// `Q[n]` asked for more qubits than the configured ceiling.
    #[error("register of {requested} qubits exceeds the limit of {limit}")]
    RegisterTooLarge { requested: usize, limit: usize },

    /// The amplitude vector holds NaN/inf or drifted away from unit norm.
    #[error("numerical error: {0}")]
    Numerical(String),
}

impl SimError {
    pub fn qubit_out_of_range(qubit: usize, size: usize) -> Self {
        SimError::OperandOutOfRange(RangeViolation::Qubit { qubit, size })
    }

    pub fn not_adjacent(control: usize, target: usize) -> Self {
        SimError::OperandOutOfRange(RangeViolation::NotAdjacent { control, target })
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        SimError::MalformedSyntax(detail.into())
    }
}

/// The fatal error that ends a run, tagged with its 1-based source line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid syntax in line {line}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub kind: SimError,
}

impl LineError {
    pub fn new(line: usize, kind: SimError) -> Self {
        LineError { line, kind }
    }
}
