//! Quantum gate library for PQA
//!
//! This crate provides the gates the simulator applies:
//!
//! - **Standard gates** with `const` matrices: H, X, Y, Z, I, S, T and CNOT
//! - **Parameterized phase gate** P(θ) = diag(1, e^(iθ))
//! - **Custom gates** whose matrices are validated for unitarity at
//!   construction
//! - **Registry** resolving gate names (`"H"`, `"CNOT"`, `"P(pi/4)"`) for
//!   scripts and the interactive emulator
//!
//! # Example
//!
//! ```
//! use pqa_core::Gate;
//! use pqa_gates::standard::{CNot, Hadamard, Phase};
//! use pqa_gates::matrix_ops::{is_unitary, DEFAULT_UNITARY_TOLERANCE};
//! use std::f64::consts::PI;
//!
//! let h_matrix = Hadamard::matrix();
//! assert_eq!(h_matrix.len(), 2);
//!
//! let p = Phase::new(PI / 4.0);
//! assert!(is_unitary(&Gate::matrix(&p), DEFAULT_UNITARY_TOLERANCE));
//! assert_eq!(CNot.num_qubits(), 2);
//! ```

pub mod custom;
pub mod matrices;
pub mod matrix_ops;
pub mod registry;
pub mod standard;

// Re-export commonly used items
pub use custom::CustomGate;
pub use registry::GateRegistry;
pub use standard::*;
