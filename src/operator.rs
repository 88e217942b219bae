//! Full-register operators built from 2x2 and 4x4 generators.
//!
//! The reference construction grows a Kronecker product one qubit position at
//! a time, `acc = kron(factor, acc)`, so every newly visited position becomes
//! the outer factor. Qubit `q` therefore ends up on bit `q` of the basis index,
//! and the strided kernels below use the same masks.

use crate::error::{Result, SimError};
use crate::gates::{self, CxVariant};
use crate::runtime::quantum_state::QuantumState;
use ndarray::{Array2, ArrayView1};
use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Largest register the dense kernel will materialize a 2^n x 2^n matrix for.
pub const DENSE_KERNEL_MAX_QUBITS: usize = 10;

/// How gates reach the state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    /// In-place pass over amplitude pairs/quads, never builds the full operator.
    #[default]
    Strided,
    /// Builds the full operator by Kronecker products and multiplies.
    Dense,
}

/// Kronecker product `a ⊗ b`.
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    Array2::from_shape_fn((ar * br, ac * bc), |(row, col)| {
        a[[row / br, col / bc]] * b[[row % br, col % bc]]
    })
}

fn seed() -> Array2<Complex64> {
    Array2::from_elem((1, 1), Complex64::new(1.0, 0.0))
}

/// `I ⊗ … ⊗ gate ⊗ … ⊗ I` over `n` qubits with `gate` at `target`.
pub fn lift_single(gate: &Array2<Complex64>, target: usize, n: usize) -> Result<Array2<Complex64>> {
    if target >= n {
        return Err(SimError::qubit_out_of_range(target, n));
    }
    debug_assert_eq!(gate.dim(), (2, 2));
    let identity = gates::identity();
    let mut acc = seed();
    for position in 0..n {
        let factor = if position == target { gate } else { &identity };
        acc = kron(factor, &acc);
    }
    Ok(acc)
}

/// Full operator for a 4x4 generator covering qubits `position` and `position + 1`.
pub fn lift_adjacent(gate: &Array2<Complex64>, position: usize, n: usize) -> Result<Array2<Complex64>> {
    if position + 1 >= n {
        return Err(SimError::qubit_out_of_range(position + 1, n));
    }
    debug_assert_eq!(gate.dim(), (4, 4));
    let identity = gates::identity();
    let mut acc = seed();
    // n - 1 factors, the generator fills two tensor slots
    for slot in 0..n - 1 {
        let factor = if slot == position { gate } else { &identity };
        acc = kron(factor, &acc);
    }
    Ok(acc)
}

/// `u · psi`.
pub fn apply_dense(u: &Array2<Complex64>, psi: &[Complex64]) -> Vec<Complex64> {
    u.dot(&ArrayView1::from(psi)).to_vec()
}

/// Applies a 2x2 generator to qubit `target` in place.
pub fn apply_single_strided(amps: &mut [Complex64], gate: &Array2<Complex64>, target: usize) {
    let mask = 1usize << target;
    let (g00, g01, g10, g11) = (gate[[0, 0]], gate[[0, 1]], gate[[1, 0]], gate[[1, 1]]);
    let old_amps = amps.to_vec(); // snapshot for safe parallel reads

    amps.par_iter_mut().enumerate().for_each(|(i, amp)| {
        let lo = old_amps[i & !mask];
        let hi = old_amps[i | mask];
        *amp = if i & mask == 0 {
            g00 * lo + g01 * hi
        } else {
            g10 * lo + g11 * hi
        };
    });
}

/// Applies a 4x4 generator to qubits `position` and `position + 1` in place.
pub fn apply_adjacent_strided(amps: &mut [Complex64], gate: &Array2<Complex64>, position: usize) {
    let mask = 0b11usize << position;
    let old_amps = amps.to_vec();

    amps.par_iter_mut().enumerate().for_each(|(i, amp)| {
        let row = (i & mask) >> position;
        let base = i & !mask;
        *amp = (0..4)
            .map(|col| gate[[row, col]] * old_amps[base | (col << position)])
            .sum();
    });
}

// dense is only worth it for registers small enough to hold the full matrix
fn effective_kernel(kernel: Kernel, n: usize) -> Kernel {
    if kernel == Kernel::Dense && n > DENSE_KERNEL_MAX_QUBITS {
        log::warn!(
            "dense kernel refused for {} qubits (limit {}), using strided",
            n,
            DENSE_KERNEL_MAX_QUBITS
        );
        return Kernel::Strided;
    }
    kernel
}

pub fn apply_single_qubit_gate(
    state: &mut QuantumState,
    gate: &Array2<Complex64>,
    target: usize,
    kernel: Kernel,
) -> Result<()> {
    state.check_qubit(target)?;
    let n = state.num_qubits();
    match effective_kernel(kernel, n) {
        Kernel::Dense => {
            let u = lift_single(gate, target, n)?;
            let result = apply_dense(&u, state.amplitudes());
            state.apply(result);
        }
        Kernel::Strided => apply_single_strided(state.amplitudes_mut(), gate, target),
    }
    Ok(())
}

/// Controlled-X between neighbouring qubits.
///
/// Control and target must differ by exactly one, so `CX[c,c]` is rejected as `NotAdjacent`.
pub fn apply_cx(state: &mut QuantumState, control: usize, target: usize, kernel: Kernel) -> Result<()> {
    state.check_qubit(control)?;
    state.check_qubit(target)?;
    if control.abs_diff(target) != 1 {
        return Err(SimError::not_adjacent(control, target));
    }

    let gate = CxVariant::for_operands(control, target).matrix();
    let position = control.min(target);
    let n = state.num_qubits();
    match effective_kernel(kernel, n) {
        Kernel::Dense => {
            let u = lift_adjacent(&gate, position, n)?;
            let result = apply_dense(&u, state.amplitudes());
            state.apply(result);
        }
        Kernel::Strided => apply_adjacent_strided(state.amplitudes_mut(), &gate, position),
    }
    Ok(())
}
