/*
	circuit runtime: register state, measurement and the per-line dispatcher
*/

pub mod measurement;
pub mod quantum_state;
pub mod session;

pub use measurement::{Measurement, MeasurementMode};
pub use quantum_state::{BasisAmplitude, QuantumState};
pub use session::{Outcome, RunSummary, Session};
