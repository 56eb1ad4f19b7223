//! Quantum state representations for PQA
//!
//! This crate holds the simulator's state and the two transitions it
//! supports:
//!
//! - [`Qubit`]: a standalone single qubit α|0⟩ + β|1⟩
//! - [`QuantumRegister`]: the dense `2^n` state vector of an n-qubit register
//! - Gate application through bit-masked block kernels ([`kernel`])
//! - Born-rule measurement with an injected random source ([`measurement`])
//!
//! # Example
//!
//! ```
//! use pqa_gates::Hadamard;
//! use pqa_state::{QuantumRegister, Qubit};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut plus = Qubit::new();
//! plus.apply_gate(&Hadamard).unwrap();
//!
//! let mut register = QuantumRegister::from_qubits(&[plus, Qubit::new()]).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let index = register.measure_all(&mut rng).unwrap();
//! assert!(index == 0b00 || index == 0b10);
//! ```

pub mod kernel;
pub mod measurement;
pub mod qubit;
pub mod register;

pub use measurement::{measure_qubit, measure_qubit_with, MeasurementOutcome, SamplingResult};
pub use qubit::{BlochVector, Qubit};
pub use register::QuantumRegister;
