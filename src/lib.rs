pub mod config; // for simulation settings
pub mod error; // for error kinds
pub mod gates; // for the gate catalogue
pub mod instructions; // for instruction enum and line parser
pub mod operator; // for kronecker operators and kernels
pub mod render; // for console output
pub mod runtime; // for runtime
