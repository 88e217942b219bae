// fixed gate catalogue: the five single qubit gates plus both adjacent cx layouts

use ndarray::{arr2, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const INV_SQRT2: Complex64 = Complex64::new(FRAC_1_SQRT_2, 0.0);
const NEG_INV_SQRT2: Complex64 = Complex64::new(-FRAC_1_SQRT_2, 0.0);
// e^(i*pi/4)
const EIGHTH_TURN: Complex64 = Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);

pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];
pub const PAULI_Y: [[Complex64; 2]; 2] = [[ZERO, NEG_I], [I, ZERO]];
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]];
pub const HADAMARD: [[Complex64; 2]; 2] = [[INV_SQRT2, INV_SQRT2], [INV_SQRT2, NEG_INV_SQRT2]];
pub const T_GATE: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, EIGHTH_TURN]];

// local basis index is (bit of higher position << 1) | bit of lower position.
// target is the next qubit (control + 1), control sits on the low bit
pub const CX_NEXT: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ONE, ZERO, ZERO],
];

// target is the previous qubit (control - 1), control sits on the high bit
pub const CX_PREV: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    X,
    Y,
    Z,
    H,
    T,
}

impl Gate {
    pub const ALL: [Gate; 5] = [Gate::X, Gate::Y, Gate::Z, Gate::H, Gate::T];

    /// Looks a gate up by its opcode character. `None` means the caller has an
    /// unrecognized instruction, not a bad operand.
    pub fn from_symbol(symbol: char) -> Option<Gate> {
        match symbol {
            'X' => Some(Gate::X),
            'Y' => Some(Gate::Y),
            'Z' => Some(Gate::Z),
            'H' => Some(Gate::H),
            'T' => Some(Gate::T),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Gate::X => 'X',
            Gate::Y => 'Y',
            Gate::Z => 'Z',
            Gate::H => 'H',
            Gate::T => 'T',
        }
    }

    pub fn generator(self) -> &'static [[Complex64; 2]; 2] {
        match self {
            Gate::X => &PAULI_X,
            Gate::Y => &PAULI_Y,
            Gate::Z => &PAULI_Z,
            Gate::H => &HADAMARD,
            Gate::T => &T_GATE,
        }
    }

    pub fn matrix(self) -> Array2<Complex64> {
        arr2(self.generator())
    }
}

/// Which of the two adjacent controlled-X layouts a `CX[c,t]` needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CxVariant {
    TargetAbove,
    TargetBelow,
}

impl CxVariant {
    /// Adjacency is checked by the caller; only the ordering matters here.
    pub fn for_operands(control: usize, target: usize) -> CxVariant {
        if target < control {
            CxVariant::TargetBelow
        } else {
            CxVariant::TargetAbove
        }
    }

    pub fn generator(self) -> &'static [[Complex64; 4]; 4] {
        match self {
            CxVariant::TargetAbove => &CX_NEXT,
            CxVariant::TargetBelow => &CX_PREV,
        }
    }

    pub fn matrix(self) -> Array2<Complex64> {
        arr2(self.generator())
    }
}

pub fn identity() -> Array2<Complex64> {
    arr2(&IDENTITY)
}
