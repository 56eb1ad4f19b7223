//! Core types and traits for the PQA quantum simulator
//!
//! This crate provides the fundamental types shared by every other crate:
//! - [`Amplitude`]: complex probability amplitude with checked normalization
//! - [`QubitId`]: Type-safe qubit addressing
//! - [`Gate`]: Trait for unitary quantum operations
//! - [`Circuit`]: Ordered sequence of gate applications and measurements
//! - [`QuantumError`]: The error taxonomy of the simulator
//!
//! # Example
//! ```
//! use pqa_core::{Circuit, QubitId};
//!
//! let circuit = Circuit::new(2).unwrap();
//! let q0 = QubitId::new(0);
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(q0.to_string(), "q0");
//! ```

pub mod amplitude;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;

// Re-exports for convenience
pub use amplitude::{checked_scale_by_norm, normalize_amplitudes, Amplitude};
pub use circuit::{Circuit, Operation};
pub use error::{ErrorKind, QuantumError};
pub use gate::{check_targets, Gate, GateOp};
pub use num_complex::Complex64;
pub use qubit::QubitId;

/// Type alias for results in PQA
pub type Result<T> = std::result::Result<T, QuantumError>;

/// Largest register the dense state vector supports (2^30 amplitudes, 16 GiB)
pub const MAX_QUBITS: usize = 30;
