// all supported instructions of the circuit language, one per source line
//
//   Q[n]        initialize an n-qubit register
//   X[q] ...    single qubit gate, one of X Y Z H T
//   CX[c,t]     controlled-x on neighbouring qubits
//   D           display the state
//   MZ[q]       measure qubit q in the computational basis

use crate::error::{LineError, RangeViolation, Result, SimError};
use crate::gates::Gate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    Init(usize),
    SingleGate(Gate, usize),
    ControlledX { control: usize, target: usize },
    Display,
    Measure(usize),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Init(n) => write!(f, "Q[{}]", n),
            Instruction::SingleGate(gate, q) => write!(f, "{}[{}]", gate.symbol(), q),
            Instruction::ControlledX { control, target } => write!(f, "CX[{},{}]", control, target),
            Instruction::Display => write!(f, "D"),
            Instruction::Measure(q) => write!(f, "MZ[{}]", q),
        }
    }
}

/// Drops every space, tab and carriage return.
pub fn strip_whitespace(line: &str) -> String {
    line.chars().filter(|c| !matches!(c, ' ' | '\t' | '\r')).collect()
}

/// Parses one source line.
///
/// Returns `Ok(None)` for lines that carry no instruction (blank or `//`).
pub fn parse_instruction(line: &str) -> Result<Option<Instruction>> {
    let line = strip_whitespace(line);
    if line.is_empty() || line.starts_with("//") {
        return Ok(None);
    }

    // two-letter opcodes first so that "CX"/"MZ" never reach the gate lookup
    if let Some(rest) = line.strip_prefix("CX") {
        let operands = bracketed(rest)?;
        let (control, target) = operands
            .split_once(',')
            .ok_or_else(|| SimError::malformed(format!("CX expects two operands in '{}'", line)))?;
        return Ok(Some(Instruction::ControlledX {
            control: parse_operand(control)?,
            target: parse_operand(target)?,
        }));
    }
    if let Some(rest) = line.strip_prefix("MZ") {
        return Ok(Some(Instruction::Measure(parse_operand(bracketed(rest)?)?)));
    }
    if line == "D" {
        return Ok(Some(Instruction::Display));
    }

    let mut chars = line.chars();
    let opcode = chars.next().unwrap_or_default();
    let rest = chars.as_str();
    match opcode {
        'D' => Err(SimError::malformed(format!("D takes no operands, got '{}'", line))),
        'Q' => Ok(Some(Instruction::Init(parse_operand(bracketed(rest)?)?))),
        symbol => match Gate::from_symbol(symbol) {
            Some(gate) => Ok(Some(Instruction::SingleGate(gate, parse_operand(bracketed(rest)?)?))),
            None => Err(SimError::UnrecognizedOpcode(line.clone())),
        },
    }
}

// "[...]" directly after the opcode, with the first ']' as the very last character
fn bracketed(rest: &str) -> Result<&str> {
    let inner = rest
        .strip_prefix('[')
        .ok_or_else(|| SimError::malformed(format!("expected '[' in '{}'", rest)))?;
    match inner.find(']') {
        Some(close) if close + 1 == inner.len() => Ok(&inner[..close]),
        Some(_) => Err(SimError::malformed(format!("trailing characters after ']' in '{}'", rest))),
        None => Err(SimError::malformed(format!("missing ']' in '{}'", rest))),
    }
}

fn parse_operand(text: &str) -> Result<usize> {
    // i64 parsing would take "+1"
    if text.starts_with('+') {
        return Err(SimError::malformed(format!("invalid qubit index '{}'", text)));
    }
    let value: i64 = text
        .parse()
        .map_err(|_| SimError::malformed(format!("invalid qubit index '{}'", text)))?;
    usize::try_from(value)
        .map_err(|_| SimError::OperandOutOfRange(RangeViolation::Negative { value }))
}

/// Parses a whole program without executing it, stopping at the first bad line.
pub fn parse_program(source: &str) -> std::result::Result<Vec<(usize, Instruction)>, LineError> {
    let mut program = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        match parse_instruction(line) {
            Ok(Some(inst)) => program.push((idx + 1, inst)),
            Ok(None) => {}
            Err(kind) => return Err(LineError::new(idx + 1, kind)),
        }
    }
    Ok(program)
}
