use crate::error::Result;
use crate::runtime::quantum_state::QuantumState;
use num_complex::Complex64;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementMode {
    /// Report an outcome and leave the amplitudes untouched, so repeated
    /// measurements of one qubit keep sampling the same distribution.
    #[default]
    Sample,
    /// Project onto the observed outcome and renormalize.
    Collapse,
}

/// Probability mass of every basis state whose bit `q` is set.
pub fn probability_of_one(state: &QuantumState, q: usize) -> Result<f64> {
    state.check_qubit(q)?;
    let mask = 1usize << q;
    Ok(state
        .amplitudes()
        .par_iter()
        .enumerate()
        .filter(|(i, _)| i & mask != 0) // filter states where q-th bit is 1
        .map(|(_, amp)| amp.norm_sqr())
        .sum())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub qubit: usize,
    pub outcome: u8,
    pub probability_of_one: f64,
}

pub fn measure<R: Rng + ?Sized>(
    state: &mut QuantumState,
    q: usize,
    rng: &mut R,
    mode: MeasurementMode,
) -> Result<Measurement> {
    let probability = probability_of_one(state, q)?;
    let sample: f64 = rng.gen();
    let outcome = if sample < probability { 1 } else { 0 };

    if mode == MeasurementMode::Collapse {
        collapse(state, q, outcome);
    }

    Ok(Measurement {
        qubit: q,
        outcome,
        probability_of_one: probability,
    })
}

// zero every amplitude that disagrees with the outcome, then rescale
fn collapse(state: &mut QuantumState, q: usize, outcome: u8) {
    let mask = 1usize << q;
    let keep_set = outcome == 1;
    let kept_mass: f64 = state
        .amplitudes()
        .par_iter()
        .enumerate()
        .filter(|(i, _)| (i & mask != 0) == keep_set)
        .map(|(_, amp)| amp.norm_sqr())
        .sum();
    if kept_mass <= 0.0 {
        // only reachable through rounding drift on a definite qubit
        log::warn!(
            "qubit {} has no amplitude for outcome {}, state left unchanged",
            q,
            outcome
        );
        return;
    }

    state
        .amplitudes_mut()
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, amp)| {
            if (i & mask != 0) != keep_set {
                *amp = Complex64::new(0.0, 0.0);
            }
        });
    state.normalize();
}
