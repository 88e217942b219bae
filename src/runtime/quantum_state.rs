use crate::error::{Result, SimError};
use num_complex::Complex64;
use rayon::prelude::*; // import rayon for parallel iterators
use serde::{Deserialize, Serialize};

/// One nonzero entry of the state vector, labelled with its basis state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisAmplitude {
    pub index: usize,
    /// n-bit label, qubit 0 is the rightmost character.
    pub basis: String,
    pub re: f64,
    pub im: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumState {
    n: usize,
    amps: Vec<Complex64>,
}

impl QuantumState {
    /// Allocates the |0...0> state for `n` qubits.
    pub fn new(n: usize) -> Self {
        let mut amps = vec![Complex64::new(0.0, 0.0); 1 << n];
        amps[0] = Complex64::new(1.0, 0.0);
        QuantumState { n, amps }
    }

    pub fn num_qubits(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.amps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amps.is_empty()
    }

    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amps.get(index).copied()
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amps
    }

    // in-place access for the strided kernels, length stays fixed
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amps
    }

    /// Replaces the vector with the result of an operator application.
    ///
    /// A result of the wrong length is a bug in the caller, not bad input.
    pub fn apply(&mut self, result: Vec<Complex64>) {
        assert_eq!(
            result.len(),
            self.amps.len(),
            "operator result has {} amplitudes, register holds {}",
            result.len(),
            self.amps.len()
        );
        self.amps = result;
    }

    pub fn check_qubit(&self, q: usize) -> Result<()> {
        if q < self.n {
            Ok(())
        } else {
            Err(SimError::qubit_out_of_range(q, self.n))
        }
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.par_iter().map(|a| a.norm_sqr()).collect() // parallel map and collect
    }

    pub fn norm_sqr(&self) -> f64 {
        self.amps.par_iter().map(|a| a.norm_sqr()).sum()
    }

    /// Zero-padded binary label of a basis index.
    pub fn basis_label(&self, index: usize) -> String {
        if self.n == 0 {
            return String::new();
        }
        format!("{:0width$b}", index, width = self.n)
    }

    /// Every amplitude that is not exactly zero, in index order.
    pub fn nonzero_amplitudes(&self) -> Vec<BasisAmplitude> {
        self.amps
            .iter()
            .enumerate()
            .filter(|(_, amp)| amp.re != 0.0 || amp.im != 0.0)
            .map(|(index, amp)| BasisAmplitude {
                index,
                basis: self.basis_label(index),
                re: amp.re,
                im: amp.im,
            })
            .collect()
    }

    pub fn validate_state(&self) -> Result<()> {
        if self.amps.is_empty() {
            return Err(SimError::Numerical("amplitude vector is empty".to_string()));
        }

        let has_nan = self.amps.par_iter().any(|amp| amp.re.is_nan() || amp.im.is_nan());
        let has_inf = self.amps.par_iter().any(|amp| amp.re.is_infinite() || amp.im.is_infinite());

        if has_nan {
            return Err(SimError::Numerical("state contains NaN values".to_string()));
        }
        if has_inf {
            return Err(SimError::Numerical("state contains infinite values".to_string()));
        }

        let norm_sqr_sum = self.norm_sqr();
        if (norm_sqr_sum - 1.0).abs() > 1e-9 {
            return Err(SimError::Numerical(format!(
                "state is not normalized, norm squared: {}",
                norm_sqr_sum
            )));
        }

        Ok(())
    }

    // a zero vector is left as it is
    pub(crate) fn normalize(&mut self) {
        let norm_sqr = self.norm_sqr();
        if norm_sqr <= 0.0 {
            return;
        }
        let norm = norm_sqr.sqrt();
        self.amps.par_iter_mut().for_each(|amp| {
            *amp /= norm;
        });
    }
}
